//! Department resource checks: search, tree, detail, create, update, move and delete.

use tracing::{debug, info};

use super::expect;
use super::suite::{Case, CaseFuture, Group, Suite, SuiteContext};
use crate::client::DEPARTMENTS_PATH;
use crate::error::AppError;
use crate::models::department::MAX_NAME_LEN;
use crate::models::{CreateDepartment, Department, DepartmentNode, DepartmentQuery, MoveDepartment, Page, UpdateDepartment};

/// Statuses accepted when an id refers to nothing.
const GONE: [u16; 2] = [400, 404];

/// Build the department suite.
pub fn suite() -> Suite {
    Suite::new(
        "departments",
        vec![
            Group::new(
                "I. GET /api/v1/departments - search",
                vec![
                    Case::new("TC_GET_DEPT_01", "default listing returns a page envelope", get_dept_default),
                    Case::new("TC_GET_DEPT_02", "name filter matches case-insensitively", get_dept_name_filter),
                    Case::new("TC_GET_DEPT_03", "maxDepth bounds every level", get_dept_max_depth),
                    Case::new("TC_GET_DEPT_04", "non-numeric pageNumber → 400", get_dept_bad_page_number),
                    Case::new("TC_GET_DEPT_05", "negative pageSize → 400", get_dept_negative_page_size),
                ],
            ),
            Group::new(
                "II. GET /api/v1/departments/tree - hierarchy",
                vec![
                    Case::new("TC_GET_TREE_01", "default tree page has children field", tree_default),
                    Case::new("TC_GET_TREE_02", "pageSize=10 caps the page", tree_paged),
                    Case::new("TC_GET_TREE_03", "page far past the end is empty", tree_past_end),
                    Case::new("TC_GET_TREE_04", "non-numeric pageSize → 400", tree_bad_page_size),
                ],
            ),
            Group::new(
                "III. GET /api/v1/departments/{id} - detail",
                vec![
                    Case::new("TC_GET_BY_ID_01", "existing id returns department and users", by_id_existing),
                    Case::new("TC_GET_BY_ID_02", "unknown id → 404 or null data", by_id_missing),
                    Case::new("TC_GET_BY_ID_03", "negative id → 400", by_id_negative),
                    Case::new("TC_GET_BY_ID_04", "non-numeric id → 400", by_id_non_numeric),
                ],
            ),
            Group::new(
                "IV. POST /api/v1/departments - create",
                vec![
                    Case::new("TC_CREATE_01", "root department is created", create_root),
                    Case::new("TC_CREATE_02", "child keeps its parent_id", create_child),
                    Case::new("TC_CREATE_03", "empty name → 400", create_empty_name),
                    Case::new("TC_CREATE_04", "name over 255 chars → 400", create_long_name),
                    Case::new("TC_CREATE_05", "duplicate name → 200, 400 or 409", create_duplicate),
                ],
            ),
            Group::new(
                "V. PUT /api/v1/departments/{id} - update",
                vec![
                    Case::new("TC_UPDATE_01", "rename returns the new name", update_rename),
                    Case::new("TC_UPDATE_02", "unknown id → 200 or 404", update_missing),
                    Case::new("TC_UPDATE_03", "empty name → 400", update_empty_name),
                    Case::new("TC_UPDATE_04", "malformed id → 400", update_bad_id),
                ],
            ),
            Group::new(
                "VI. POST /api/v1/departments/move - move",
                vec![
                    Case::new("TC_MOVE_01", "valid move succeeds", move_valid),
                    Case::new("TC_MOVE_02", "move onto itself → 400", move_self),
                    Case::new("TC_MOVE_03", "move under own descendant → 400", move_cycle),
                    Case::new("TC_MOVE_04", "missing target parent → 400 or 404", move_missing_parent),
                ],
            ),
            Group::new(
                "VII. DELETE /api/v1/departments/{id} - delete",
                vec![
                    Case::new("TC_DELETE_01", "leaf is deleted and gone", delete_leaf),
                    Case::new("TC_DELETE_02", "subtree root deletes descendants", delete_subtree),
                    Case::new("TC_DELETE_03", "unknown id → 200 or 404", delete_missing),
                    Case::new("TC_DELETE_04", "malformed id → 400", delete_bad_id),
                ],
            )
            .with_setup(Case::new("SETUP_DELETE", "create a leaf to delete", create_temp)),
        ],
    )
}

// I. search

fn get_dept_default(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.list_departments(&DepartmentQuery::default()).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        expect::field_eq(&body, "/metadata/path", DEPARTMENTS_PATH)?;
        expect::field_eq(&body, "/metadata/message", "OK")?;
        expect::array(&body, "/data/content")?;
        expect::field(&body, "/data/totalElements")?;
        Ok(())
    })
}

fn get_dept_name_filter(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let filter = ctx.fixtures.name_filter.clone();
        let response = ctx.client.list_departments(&DepartmentQuery::default().name(&filter)).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        for dept in expect::array(&body, "/data/content")? {
            expect::contains_ci(expect::string(dept, "/name")?, &filter)?;
        }
        Ok(())
    })
}

fn get_dept_max_depth(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let depth = ctx.fixtures.max_depth;
        let response = ctx.client.list_departments(&DepartmentQuery::default().max_depth(depth)).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        for dept in expect::array(&body, "/data/content")? {
            let level = expect::number(dept, "/level")?;
            expect::at_most("level", level, f64::from(depth))?;
        }
        Ok(())
    })
}

fn get_dept_bad_page_number(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.list_departments(&DepartmentQuery::default().page_number("abc")).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn get_dept_negative_page_size(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.list_departments(&DepartmentQuery::default().page_size(-1)).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

// II. tree

fn tree_default(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.department_tree(&DepartmentQuery::default()).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        let content = expect::array(&body, "/data/content")?;
        expect::field(&body, "/data/totalElements")?;
        if let Some(node) = content.first() {
            expect::null_or_array(node, "/children")?;
        }

        let page = expect::decode::<Page<DepartmentNode>>(&response)?.data.unwrap_or_else(|| Page {
            content: Vec::new(),
            total_elements: 0,
        });
        for root in &page.content {
            let ids = root.subtree_ids();
            expect::ensure(ids.iter().all(|id| *id > 0), format!("non-positive id in subtree {ids:?}"))?;
            debug!("Tree root {} spans {} nodes, depth {}", root.department.id, ids.len(), root.depth());
        }
        Ok(())
    })
}

fn tree_paged(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let query = DepartmentQuery::default().page_size(10).page_number(1);
        let response = ctx.client.department_tree(&query).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        let content = expect::array(&body, "/data/content")?;
        expect::at_most("content length", content.len() as i64, 10)?;
        Ok(())
    })
}

fn tree_past_end(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.department_tree(&DepartmentQuery::default().page_number(9999)).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        let content = expect::array(&body, "/data/content")?;
        expect::ensure(content.is_empty(), format!("expected empty content, got {} items", content.len()))?;
        Ok(())
    })
}

fn tree_bad_page_size(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.department_tree(&DepartmentQuery::default().page_size("abc")).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

// III. detail

fn by_id_existing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let id = ctx.fixtures.existing_department_id;
        let response = ctx.client.get_department(id).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        expect::field_eq(&body, "/data/id", id)?;
        expect::field(&body, "/data/name")?;
        expect::field(&body, "/data/users_count")?;
        expect::null_or_array(&body, "/data/users")?;

        let dept = expect::decode::<Department>(&response)?.data;
        let users = dept.as_ref().and_then(|d| d.users.as_ref()).map_or(0, Vec::len);
        debug!("Department {id} carries {users} users");
        Ok(())
    })
}

fn by_id_missing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_department(ctx.fixtures.missing_detail_id).await?;
        if expect::status_in(&response, &[200, 404])? == 200 {
            let body = expect::json(&response)?;
            expect::is_null(&body, "/data")?;
        }
        Ok(())
    })
}

fn by_id_negative(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_department(-5).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn by_id_non_numeric(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.get_department("abc").await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

// IV. create

fn create_root(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.create_department(&CreateDepartment::root("Phòng A")).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        let id = expect::integer(&body, "/data/id")?;
        expect::field_eq(&body, "/data/name", "Phòng A")?;

        info!("Created root department {id}");
        ctx.created_id = Some(id);
        Ok(())
    })
}

fn create_child(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let parent_id = ctx
            .created_id
            .ok_or_else(|| AppError::assertion("no department id recorded by TC_CREATE_01"))?;
        let response = ctx
            .client
            .create_department(&CreateDepartment::child("Phòng B", parent_id))
            .await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        expect::field_eq(&body, "/data/parent_id", parent_id)?;
        Ok(())
    })
}

fn create_empty_name(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.create_department(&CreateDepartment::root("")).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn create_long_name(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        let response = ctx.client.create_department(&CreateDepartment::root(name)).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn create_duplicate(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.create_department(&CreateDepartment::root("Phòng A")).await?;
        expect::status_in(&response, &[200, 400, 409])?;
        Ok(())
    })
}

// V. update

fn update_rename(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = UpdateDepartment {
            name: "Phòng mới".to_string(),
        };
        let response = ctx
            .client
            .update_department(ctx.fixtures.existing_department_id, &data)
            .await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        expect::field_eq(&body, "/data/name", "Phòng mới")?;
        Ok(())
    })
}

fn update_missing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = UpdateDepartment {
            name: "Bất kỳ".to_string(),
        };
        let response = ctx.client.update_department(ctx.fixtures.missing_id, &data).await?;
        expect::status_in(&response, &[200, 404])?;
        Ok(())
    })
}

fn update_empty_name(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = UpdateDepartment { name: String::new() };
        let response = ctx
            .client
            .update_department(ctx.fixtures.existing_department_id, &data)
            .await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn update_bad_id(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = UpdateDepartment { name: "ABC".to_string() };
        let response = ctx.client.update_department("xyz", &data).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

// VI. move

fn move_valid(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = MoveDepartment {
            department_id: ctx.fixtures.move_department_id,
            new_parent_id: ctx.fixtures.move_target_id,
        };
        let response = ctx.client.move_department(&data).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        Ok(())
    })
}

fn move_self(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let id = ctx.fixtures.self_move_id;
        let data = MoveDepartment {
            department_id: id,
            new_parent_id: id,
        };
        let response = ctx.client.move_department(&data).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn move_cycle(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = MoveDepartment {
            department_id: ctx.fixtures.existing_department_id,
            new_parent_id: ctx.fixtures.cycle_parent_id,
        };
        let response = ctx.client.move_department(&data).await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}

fn move_missing_parent(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let data = MoveDepartment {
            department_id: ctx.fixtures.self_move_id,
            new_parent_id: ctx.fixtures.missing_parent_id,
        };
        let response = ctx.client.move_department(&data).await?;
        expect::status_in(&response, &[400, 404])?;
        Ok(())
    })
}

// VII. delete

fn create_temp(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.create_department(&CreateDepartment::root("Temp To Delete")).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;
        ctx.temp_id = Some(expect::integer(&body, "/data/id")?);
        Ok(())
    })
}

fn delete_leaf(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let id = ctx
            .temp_id
            .ok_or_else(|| AppError::assertion("no temporary department to delete"))?;
        let response = ctx.client.delete_department(id).await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;

        let check = ctx.client.get_department(id).await?;
        expect::status_in(&check, &GONE)?;
        Ok(())
    })
}

fn delete_subtree(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx
            .client
            .delete_department(ctx.fixtures.existing_department_id)
            .await?;
        expect::status(&response, 200)?;

        let body = expect::json(&response)?;
        expect::http_code(&body, 200)?;

        let check_child = ctx.client.get_department(ctx.fixtures.child_department_id).await?;
        expect::status_in(&check_child, &GONE)?;
        Ok(())
    })
}

fn delete_missing(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.delete_department(ctx.fixtures.missing_id).await?;
        expect::status_in(&response, &[200, 404])?;
        Ok(())
    })
}

fn delete_bad_id(ctx: &mut SuiteContext) -> CaseFuture<'_> {
    Box::pin(async move {
        let response = ctx.client.delete_department("abc").await?;
        expect::status(&response, 400)?;
        Ok(())
    })
}
