//! Contact-geometry documents: load with migration, save at the current
//! version.

use crate::{CURRENT_VERSION, LoadOptions, Result, XmlError, XmlNode, migrate, parse_str};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use sinew_contact::{ContactShape, create_shape};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Root element of a document.
pub const DOCUMENT_TAG: &str = "SinewDocument";
/// Element holding the shapes.
pub const GEOMETRY_SET_TAG: &str = "ContactGeometrySet";

const VERSION_ATTR: &str = "Version";
const NAME_ATTR: &str = "name";
/// Older documents wrap the shapes in an extra element.
const OBJECTS_TAG: &str = "objects";

/// Load every shape of a document from a file. Relative mesh files are read
/// next to the document unless `options` names another directory.
pub fn load_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Vec<Box<dyn ContactShape>>> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    load_str(&xml, &options.for_document(path))
}

/// Load every shape of a document.
///
/// A document without a `Version` attribute is treated as predating all
/// schema changes.
pub fn load_str(xml: &str, options: &LoadOptions) -> Result<Vec<Box<dyn ContactShape>>> {
    let root = parse_str(xml)?;
    if root.name != DOCUMENT_TAG {
        return Err(XmlError::InvalidDocument(format!(
            "expected root element `{}`, found `{}`",
            DOCUMENT_TAG, root.name
        )));
    }
    let version = document_version(&root)?;
    check_version(&root.name, version)?;

    let Some(set) = root.child(GEOMETRY_SET_TAG) else {
        return Ok(Vec::new());
    };
    let nodes = match set.child(OBJECTS_TAG) {
        Some(objects) => &objects.children,
        None => &set.children,
    };

    let mut seen = HashSet::new();
    let mut shapes = Vec::with_capacity(nodes.len());
    for node in nodes {
        let shape = load_shape(node, version, options)?;
        if !seen.insert(shape.name().to_string()) {
            return Err(XmlError::InvalidDocument(format!(
                "duplicate contact geometry `{}`",
                shape.name()
            )));
        }
        shapes.push(shape);
    }
    info!(version, count = shapes.len(), "loaded contact geometry");
    Ok(shapes)
}

/// Build one shape from its element, written at schema `version`.
///
/// Failures name the element, e.g. ``ContactSphere `heel` ``.
pub fn load_shape(node: &XmlNode, version: u32, options: &LoadOptions) -> Result<Box<dyn ContactShape>> {
    let label = node_label(node);
    check_version(&label, version)?;

    let name = node.attribute(NAME_ATTR).unwrap_or("");
    if name.is_empty() {
        return Err(XmlError::InvalidDocument(format!("{} has no name", node.name)));
    }
    let in_node = |source| XmlError::Shape {
        node: label.clone(),
        source,
    };
    let mut shape = create_shape(&node.name, name).map_err(in_node)?;

    let mut node = node.clone();
    migrate(&mut node, version).map_err(|e| match e {
        XmlError::InvalidDocument(msg) => XmlError::InvalidDocument(format!("{}: {}", label, msg)),
        other => other,
    })?;

    for child in &node.children {
        if shape.set_property(&child.name, &child.text).map_err(in_node)? {
            continue;
        }
        if options.strict_properties {
            return Err(XmlError::UnknownProperty {
                node: label.clone(),
                property: child.name.clone(),
            });
        }
        warn!(node = %label, property = %child.name, "ignoring unknown property");
    }

    if let Some(dir) = &options.base_dir {
        shape.set_base_dir(dir);
    }
    if options.load_meshes {
        shape.update_geometry().map_err(in_node)?;
    }
    debug!(node = %label, version, "loaded shape");
    Ok(shape)
}

fn document_version(root: &XmlNode) -> Result<u32> {
    match root.attribute(VERSION_ATTR) {
        None => Ok(0),
        Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
            XmlError::InvalidDocument(format!("bad {} `{}`: {}", VERSION_ATTR, raw, e))
        }),
    }
}

fn check_version(node: &str, version: u32) -> Result<()> {
    if version > CURRENT_VERSION {
        return Err(XmlError::UnsupportedSchema {
            node: node.to_string(),
            version,
            supported: CURRENT_VERSION,
        });
    }
    Ok(())
}

fn node_label(node: &XmlNode) -> String {
    match node.attribute(NAME_ATTR) {
        Some(name) => format!("{} `{}`", node.name, name),
        None => node.name.clone(),
    }
}

/// Serialize shapes as a current-version document.
pub fn to_xml_string(shapes: &[Box<dyn ContactShape>]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let version = CURRENT_VERSION.to_string();
    let mut root = BytesStart::new(DOCUMENT_TAG);
    root.push_attribute((VERSION_ATTR, version.as_str()));
    writer.write_event(Event::Start(root))?;
    writer.write_event(Event::Start(BytesStart::new(GEOMETRY_SET_TAG)))?;
    for shape in shapes {
        write_shape(&mut writer, shape.as_ref())?;
    }
    writer.write_event(Event::End(BytesEnd::new(GEOMETRY_SET_TAG)))?;
    writer.write_event(Event::End(BytesEnd::new(DOCUMENT_TAG)))?;

    String::from_utf8(writer.into_inner()).map_err(|e| XmlError::InvalidDocument(e.to_string()))
}

fn write_shape(writer: &mut Writer<Vec<u8>>, shape: &dyn ContactShape) -> Result<()> {
    let mut start = BytesStart::new(shape.type_name());
    start.push_attribute((NAME_ATTR, shape.name()));
    writer.write_event(Event::Start(start))?;
    for (name, value) in shape.properties() {
        if value.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new(name)))?;
            continue;
        }
        writer.write_event(Event::Start(BytesStart::new(name)))?;
        writer.write_event(Event::Text(BytesText::new(&value)))?;
        writer.write_event(Event::End(BytesEnd::new(name)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(shape.type_name())))?;
    Ok(())
}

/// Write shapes to `path` as a current-version document.
pub fn save<P: AsRef<Path>>(path: P, shapes: &[Box<dyn ContactShape>]) -> Result<()> {
    let xml = to_xml_string(shapes)?;
    fs::write(path.as_ref(), xml)?;
    info!(path = %path.as_ref().display(), count = shapes.len(), "saved contact geometry");
    Ok(())
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;
    use sinew_contact::{Color, ContactSphere, DisplayPreference};
    use sinew_math::Vec3;

    fn vec3(range: f64) -> impl Strategy<Value = Vec3> {
        (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    proptest! {
        #[test]
        fn save_load_preserves_fields(
            location in vec3(10.0),
            orientation in vec3(std::f64::consts::PI),
            pref in prop::sample::select(vec![0, 1, 3, 4]),
            color in (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64),
            radius in 1e-4..1.0f64,
        ) {
            let mut sphere = ContactSphere::new("s", radius);
            let geom = sphere.geometry_mut();
            geom.set_frame_name("/bodyset/b");
            geom.set_location(location);
            geom.set_orientation(orientation);
            geom.set_display_preference(DisplayPreference::try_from(pref).unwrap());
            geom.set_color(Color::new(color.0, color.1, color.2)).unwrap();

            let shapes: Vec<Box<dyn ContactShape>> = vec![Box::new(sphere)];
            let xml = to_xml_string(&shapes).unwrap();
            let loaded = load_str(&xml, &LoadOptions::default()).unwrap();
            let back = loaded[0].geometry();

            prop_assert_eq!(back.location(), location);
            prop_assert_eq!(back.orientation(), orientation);
            prop_assert_eq!(back.display_preference().as_i32(), pref);
            prop_assert_eq!(back.color(), Color::new(color.0, color.1, color.2));
            prop_assert_eq!(loaded[0].properties(), shapes[0].properties());
        }
    }
}
