//! Wire models for the departments, users and website-links endpoints.

pub mod department;
pub mod envelope;
pub mod user;
pub mod website_link;

pub use department::{CreateDepartment, Department, DepartmentNode, DepartmentQuery, MoveDepartment, UpdateDepartment};
pub use envelope::{Envelope, Metadata, Page};
pub use user::User;
pub use website_link::WebsiteLink;
