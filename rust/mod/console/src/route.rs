//! Static navigation tree and role-based pruning.

use serde::Serialize;

use crate::role::{Capabilities, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Icon {
    QrCode,
    Event,
    Settings,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    pub path: String,
    pub text: String,
    pub icon: Option<Icon>,
    /// Empty means public.
    pub allow_roles: Vec<Role>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode>,
    /// Rendered in the bottom section of the sidebar.
    pub bottom_nav: bool,
}

impl RouteNode {
    pub fn new(path: &str, text: &str, icon: Icon, allow_roles: &[Role]) -> Self {
        Self {
            path: path.to_string(),
            text: text.to_string(),
            icon: Some(icon),
            allow_roles: allow_roles.to_vec(),
            children: Vec::new(),
            bottom_nav: false,
        }
    }

    pub fn with_children(mut self, children: Vec<RouteNode>) -> Self {
        self.children = children;
        self
    }

    pub fn bottom(mut self) -> Self {
        self.bottom_nav = true;
        self
    }
}

/// The console's routes.
pub fn route_tree() -> Vec<RouteNode> {
    vec![
        RouteNode::new(
            "/",
            "Conference QR",
            Icon::QrCode,
            &[Role::GeneralAdmin, Role::SessionAdmin, Role::Employee],
        ),
        RouteNode::new("/event-types", "Event Types", Icon::Event, &[Role::GeneralAdmin]),
    ]
}

/// Keep the nodes `caps` may see, preserving sibling order.
///
/// A node survives only if it is permitted itself; the children of a
/// surviving node are pruned the same way. Filtering twice with the same
/// capabilities is a no-op.
pub fn filter_routes(tree: &[RouteNode], caps: &Capabilities) -> Vec<RouteNode> {
    tree.iter()
        .filter(|node| caps.permits(&node.allow_roles))
        .map(|node| RouteNode {
            children: filter_routes(&node.children, caps),
            ..node.clone()
        })
        .collect()
}

/// Depth-first list of every path in `tree`.
pub fn navigable_paths(tree: &[RouteNode]) -> Vec<String> {
    let mut out = Vec::new();
    collect_paths(tree, &mut out);
    out
}

fn collect_paths(tree: &[RouteNode], out: &mut Vec<String>) {
    for node in tree {
        out.push(node.path.clone());
        collect_paths(&node.children, out);
    }
}
