//! Website-link read checks, including authentication and latency.

use std::time::Duration;

use super::expect;
use super::suite::{Case, CaseFuture, Group, Suite, SuiteContext};
use crate::client::AuthMode;
use crate::models::WebsiteLink;

/// Build the website-link suite.
pub fn suite() -> Suite {
    Suite::new(
        "website-links",
        vec![Group::new(
            "GET /api/v1/website-links/{id}",
            vec![
                Case::new("TC01", "existing id → 200", existing),
                Case::new("TC02", "unknown id → 404 or null data", missing),
                Case::new("TC03", "negative id → 400", negative),
                Case::new("TC04", "non-numeric id → 400", non_numeric),
                Case::new("TC05", "no id → 404", no_id),
                Case::new("TC06", "empty token → 401", no_token),
                Case::new("TC07", "insufficient token → 401 or 403", insufficient_token),
                Case::new("TC08", "provoked server fault → 400 or 500", server_fault),
                Case::new("TC09", "body carries metadata, data and error", structure),
                Case::new("TC10", "lookup answers within the latency budget", latency),
            ],
        )],
    )
}

fn existing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let id = ctx.fixtures.existing_link_id;
        let response = ctx.client.get_website_link(id, AuthMode::Default).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::field(&body, "/metadata")?;
        expect::field_eq(&body, "/data/id", id)?;
        expect::decode::<WebsiteLink>(&response)?;
        Ok(())
    })
}

fn missing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_website_link(ctx.fixtures.missing_id, AuthMode::Default).await?;
        if expect::status_in(&response, &[200, 404])? == 200 {
            let body = expect::json(&response)?;
            expect::null_or_empty_object(&body, "/data")?;
        }
        Ok(())
    })
}

fn negative(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_website_link(-5, AuthMode::Default).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn non_numeric(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_website_link("abc", AuthMode::Default).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn no_id(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_website_link("", AuthMode::Default).await?;
        expect::status(&response, 404)?;
        Ok(())
    })
}

fn no_token(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx
            .client
            .get_website_link(ctx.fixtures.existing_link_id, AuthMode::Empty)
            .await?;
        expect::status(&response, 401)?;
        Ok(())
    })
}

fn insufficient_token(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let auth = AuthMode::Bearer(ctx.auth.insufficient_scope_token.clone());
        let response = ctx.client.get_website_link(ctx.fixtures.existing_link_id, auth).await?;
        expect::status_in(&response, &[401, 403])?;
        Ok(())
    })
}

fn server_fault(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_website_link(-999, AuthMode::Default).await?;
        expect::status_in(&response, &[400, 500])?;
        Ok(())
    })
}

fn structure(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx
            .client
            .get_website_link(ctx.fixtures.existing_link_id, AuthMode::Default)
            .await?;
        let body = expect::json(&response)?;
        let missing = crate::models::envelope::missing_envelope_keys(&body);
        expect::ensure(missing.is_empty(), format!("envelope is missing {missing:?}"))?;
        Ok(())
    })
}

fn latency(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let budget = Duration::from_millis(ctx.fixtures.latency_budget_ms);
        let response = ctx
            .client
            .get_website_link(ctx.fixtures.existing_link_id, AuthMode::Default)
            .await?;
        expect::within(&response, budget)?;
        Ok(())
    })
}
