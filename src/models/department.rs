//! Department entities and DTOs for create, update, move and search.

use serde::{Deserialize, Serialize};

use super::user::User;

/// Maximum department name length accepted by the server.
pub const MAX_NAME_LEN: usize = 255;

/// Department as returned by list and detail endpoints.
///
/// List and detail views expose different subsets, so every field other than
/// `id` is optional on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Depth in the tree; any JSON number, since servers differ on integer encoding.
    #[serde(default)]
    pub level: Option<serde_json::Number>,
    #[serde(default)]
    pub status: Option<serde_json::Value>,
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub users_count: Option<serde_json::Number>,
}

/// Node of the department tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentNode {
    #[serde(flatten)]
    pub department: Department,
    #[serde(default)]
    pub children: Option<Vec<DepartmentNode>>,
}

impl DepartmentNode {
    /// Ids of this node and every descendant, depth-first.
    pub fn subtree_ids(&self) -> Vec<i64> {
        let mut ids = vec![self.department.id];
        for child in self.children.iter().flatten() {
            ids.extend(child.subtree_ids());
        }
        ids
    }

    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(DepartmentNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// DTO for creating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDepartment {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}

impl CreateDepartment {
    /// Root-level department.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent_id: None,
        }
    }

    /// Department under `parent_id`.
    pub fn child(name: impl Into<String>, parent_id: i64) -> Self {
        Self {
            name: name.into(),
            parent_id: Some(parent_id),
        }
    }
}

/// DTO for updating a department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDepartment {
    pub name: String,
}

/// DTO for re-parenting a department.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveDepartment {
    pub department_id: i64,
    pub new_parent_id: i64,
}

/// Query parameters for the list and tree endpoints.
///
/// Values are kept as strings so malformed input can be sent on purpose.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<String>,
}

impl DepartmentQuery {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn max_depth(mut self, depth: impl ToString) -> Self {
        self.max_depth = Some(depth.to_string());
        self
    }

    pub fn page_number(mut self, page: impl ToString) -> Self {
        self.page_number = Some(page.to_string());
        self
    }

    pub fn page_size(mut self, size: impl ToString) -> Self {
        self.page_size = Some(size.to_string());
        self
    }

    /// Key/value pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(depth) = &self.max_depth {
            pairs.push(("maxDepth", depth.clone()));
        }
        if let Some(page) = &self.page_number {
            pairs.push(("pageNumber", page.clone()));
        }
        if let Some(size) = &self.page_size {
            pairs.push(("pageSize", size.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_detail_with_users() {
        let dept: Department = serde_json::from_value(json!({
            "id": 1,
            "name": "Phòng A",
            "parent_id": null,
            "level": 0,
            "users_count": 2,
            "users": [{ "id": 7, "username": "an" }, { "id": 8 }]
        }))
        .unwrap();

        assert_eq!(dept.id, 1);
        assert_eq!(dept.name.as_deref(), Some("Phòng A"));
        assert_eq!(dept.users_count.as_ref().and_then(|n| n.as_i64()), Some(2));
        assert_eq!(dept.users.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_decode_tolerates_open_user_and_float_level() {
        let node: DepartmentNode = serde_json::from_value(json!({
            "id": 3,
            "level": 1.0,
            "users": [{ "id": "u-7f3a", "email": "a@b.vn" }, { "username": "no-id" }],
            "children": null
        }))
        .unwrap();

        assert_eq!(node.department.level.as_ref().and_then(|n| n.as_f64()), Some(1.0));
        let users = node.department.users.unwrap();
        assert_eq!(users[0].id, Some(json!("u-7f3a")));
        assert!(users[1].id.is_none());
    }

    #[test]
    fn test_tree_helpers() {
        let node: DepartmentNode = serde_json::from_value(json!({
            "id": 1,
            "name": "root",
            "children": [
                { "id": 2, "children": [{ "id": 4, "children": null }] },
                { "id": 3, "children": [] }
            ]
        }))
        .unwrap();

        assert_eq!(node.subtree_ids(), vec![1, 2, 4, 3]);
        assert_eq!(node.depth(), 3);
    }

    #[test]
    fn test_create_omits_missing_parent() {
        let body = serde_json::to_value(CreateDepartment::root("Phòng A")).unwrap();
        assert_eq!(body, json!({ "name": "Phòng A" }));

        let body = serde_json::to_value(CreateDepartment::child("Phòng B", 5)).unwrap();
        assert_eq!(body, json!({ "name": "Phòng B", "parent_id": 5 }));
    }

    #[test]
    fn test_query_pairs_keep_raw_values() {
        let query = DepartmentQuery::default().page_number("abc").page_size(-1);
        assert_eq!(
            query.to_pairs(),
            vec![("pageNumber", "abc".to_string()), ("pageSize", "-1".to_string())]
        );
        assert!(DepartmentQuery::default().to_pairs().is_empty());
    }
}
