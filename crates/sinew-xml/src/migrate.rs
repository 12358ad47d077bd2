//! Rewrites legacy contact-geometry layouts into the current schema.
//!
//! Each [`MigrationStep`] is keyed by the schema version that introduced the
//! layout it produces. A node written at version `v` goes through every step
//! with `introduced_in > v`, oldest first. Steps only touch elements they
//! recognise, so a node already in the current layout passes through
//! unchanged.

use crate::{Result, XmlError, XmlNode};
use sinew_contact::property;
use tracing::debug;

/// Schema version written by this crate.
pub const CURRENT_VERSION: u32 = 40000;

/// One schema change.
#[derive(Debug, Clone, Copy)]
pub struct MigrationStep {
    /// Version whose layout this step produces.
    pub introduced_in: u32,
    pub name: &'static str,
    pub apply: fn(&mut XmlNode) -> Result<()>,
}

/// All schema changes in ascending version order.
pub const MIGRATIONS: &[MigrationStep] = &[
    MigrationStep {
        introduced_in: 30000,
        name: "split transform, flatten visible properties",
        apply: split_transform,
    },
    MigrationStep {
        introduced_in: 30505,
        name: "body_name to frame connector",
        apply: body_name_to_connector,
    },
    MigrationStep {
        introduced_in: 30508,
        name: "flatten connectors",
        apply: flatten_connectors,
    },
    MigrationStep {
        introduced_in: 30516,
        name: "connectee names to socket paths",
        apply: connectee_to_socket,
    },
];

/// Bring a shape node written at `version` up to [`CURRENT_VERSION`].
pub fn migrate(node: &mut XmlNode, version: u32) -> Result<()> {
    for step in MIGRATIONS.iter().filter(|s| s.introduced_in > version) {
        debug!(
            node = %node.name,
            from = version,
            step = step.introduced_in,
            "applying migration: {}",
            step.name
        );
        (step.apply)(node)?;
    }
    Ok(())
}

/// `<transform>rx ry rz x y z</transform>` becomes `orientation` and
/// `location`; `<VisibleProperties>` children move up a level.
fn split_transform(node: &mut XmlNode) -> Result<()> {
    if let Some(transform) = node.take_child("transform") {
        let [rx, ry, rz, x, y, z] = property::parse_f64_array::<6>("transform", &transform.text)?;
        if !node.has_child(property::ORIENTATION) {
            node.push_child(XmlNode::with_text(
                property::ORIENTATION,
                &property::format_f64_list(&[rx, ry, rz]),
            ));
        }
        if !node.has_child(property::LOCATION) {
            node.push_child(XmlNode::with_text(
                property::LOCATION,
                &property::format_f64_list(&[x, y, z]),
            ));
        }
    }

    if let Some(mut visible) = node.take_child("VisibleProperties") {
        for name in [property::DISPLAY_PREFERENCE, property::COLOR] {
            if let Some(child) = visible.take_child(name) {
                if !node.has_child(name) {
                    node.push_child(child);
                }
            }
        }
    }
    Ok(())
}

/// `<body_name>B</body_name>` becomes a `frame` connector.
fn body_name_to_connector(node: &mut XmlNode) -> Result<()> {
    let Some(body) = node.take_child("body_name") else {
        return Ok(());
    };
    let mut connector = XmlNode::new("Connector_PhysicalFrame_");
    connector.set_attribute("name", "frame");
    connector.push_child(XmlNode::with_text("connectee_name", body.text.trim()));

    let mut connectors = XmlNode::new("connectors");
    connectors.push_child(connector);
    node.push_child(connectors);
    Ok(())
}

/// Each `<Connector_* name="X">` becomes `<connector_X_connectee_name>`.
fn flatten_connectors(node: &mut XmlNode) -> Result<()> {
    let Some(connectors) = node.take_child("connectors") else {
        return Ok(());
    };
    for connector in connectors.children {
        let Some(name) = connector.attribute("name") else {
            return Err(XmlError::InvalidDocument(format!(
                "`{}` in `{}` has no name",
                connector.name, node.name
            )));
        };
        let connectee = connector.child_text("connectee_name").unwrap_or("");
        node.push_child(XmlNode::with_text(
            &format!("connector_{}_connectee_name", name),
            connectee,
        ));
    }
    Ok(())
}

/// `<connector_X_connectee_name>` becomes `<socket_X>` holding a component
/// path.
fn connectee_to_socket(node: &mut XmlNode) -> Result<()> {
    for child in &mut node.children {
        let Some(socket) = child
            .name
            .strip_prefix("connector_")
            .and_then(|rest| rest.strip_suffix("_connectee_name"))
        else {
            continue;
        };
        child.name = format!("socket_{}", socket);
        child.text = connectee_path(child.text.trim());
    }
    Ok(())
}

/// Bare body names predate component paths; they name bodies in the body
/// set, except `ground`.
fn connectee_path(name: &str) -> String {
    if name.is_empty() || name.contains('/') {
        name.to_string()
    } else if name == "ground" {
        "/ground".to_string()
    } else {
        format!("/bodyset/{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_node() -> XmlNode {
        let mut node = XmlNode::new("ContactSphere");
        node.set_attribute("name", "heel");
        node
    }

    #[test]
    fn test_steps_are_ascending() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].introduced_in < w[1].introduced_in));
        assert!(MIGRATIONS.iter().all(|s| s.introduced_in <= CURRENT_VERSION));
    }

    #[test]
    fn test_transform_split() {
        let mut node = sphere_node();
        node.push_child(XmlNode::with_text("transform", "0.1 0.2 0.3 1 2 3"));
        let mut visible = XmlNode::new("VisibleProperties");
        visible.push_child(XmlNode::with_text("display_preference", "3"));
        visible.push_child(XmlNode::with_text("show_normals", "false"));
        node.push_child(visible);

        migrate(&mut node, 20000).unwrap();
        assert_eq!(node.child_text("orientation"), Some("0.1 0.2 0.3"));
        assert_eq!(node.child_text("location"), Some("1 2 3"));
        assert_eq!(node.child_text("display_preference"), Some("3"));
        assert!(!node.has_child("transform"));
        assert!(!node.has_child("VisibleProperties"));
        assert!(!node.has_child("show_normals"));
    }

    #[test]
    fn test_bad_transform_is_an_error() {
        let mut node = sphere_node();
        node.push_child(XmlNode::with_text("transform", "1 2 3"));
        assert!(migrate(&mut node, 20000).is_err());
    }

    #[test]
    fn test_body_name_chain() {
        let mut node = sphere_node();
        node.push_child(XmlNode::with_text("body_name", "calcn_r"));
        migrate(&mut node, 30000).unwrap();
        assert_eq!(node.child_text("socket_frame"), Some("/bodyset/calcn_r"));
        assert!(!node.has_child("body_name"));
        assert!(!node.has_child("connectors"));
    }

    #[test]
    fn test_ground_and_path_connectees() {
        assert_eq!(connectee_path("ground"), "/ground");
        assert_eq!(connectee_path("pelvis"), "/bodyset/pelvis");
        assert_eq!(connectee_path("../bodyset/pelvis"), "../bodyset/pelvis");
        assert_eq!(connectee_path(""), "");
    }

    #[test]
    fn test_connectors_block() {
        let mut node = sphere_node();
        let mut connector = XmlNode::new("Connector_PhysicalFrame_");
        connector.set_attribute("name", "frame");
        connector.push_child(XmlNode::with_text("connectee_name", "ground"));
        let mut connectors = XmlNode::new("connectors");
        connectors.push_child(connector);
        node.push_child(connectors);

        migrate(&mut node, 30505).unwrap();
        assert_eq!(node.child_text("socket_frame"), Some("/ground"));
    }

    #[test]
    fn test_current_node_unchanged() {
        let mut node = sphere_node();
        node.push_child(XmlNode::with_text("socket_frame", "/bodyset/toes_r"));
        node.push_child(XmlNode::with_text("location", "0 0 0"));
        let before = node.clone();
        migrate(&mut node, 0).unwrap();
        assert_eq!(node, before);
        migrate(&mut node, CURRENT_VERSION).unwrap();
        assert_eq!(node, before);
    }
}
