//! Helpers for the XML bodies returned by the classic API

use anyhow::{Context, Result};
use log::error;
use roxmltree::{Document, Node};

use super::models::{Group, Member};

/// Placeholder shown wherever a value could not be fetched or parsed
pub const NOT_AVAILABLE: &str = "N/A";

/// Text of the top-level `<size>` element, or `N/A`
pub fn get_size_from_xml(xml: &str) -> String {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            error!("Error parsing XML: {}", e);
            return NOT_AVAILABLE.to_string();
        }
    };

    doc.root_element()
        .children()
        .find(|n| n.has_tag_name("size"))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Parse every `<group_tag>` element of a group listing
pub fn parse_groups(xml: &str, group_tag: &str) -> Result<Vec<Group>> {
    let doc = Document::parse(xml).context("Failed to parse group listing XML")?;

    doc.descendants()
        .filter(|n| n.has_tag_name(group_tag))
        .map(|group| -> Result<Group> {
            Ok(Group {
                id: child_text(&group, "id").with_context(|| format!("{} without <id>", group_tag))?,
                name: child_text(&group, "name").unwrap_or_default(),
                is_smart: child_text(&group, "is_smart").as_deref() == Some("true"),
            })
        })
        .collect()
}

/// Parse the computers and mobile devices listed in a group record
pub fn parse_group_members(xml: &str) -> Result<Vec<Member>> {
    let doc = Document::parse(xml).context("Failed to parse group members XML")?;

    let members = doc
        .descendants()
        .filter(|n| n.has_tag_name("computer") || n.has_tag_name("mobile_device"))
        .filter_map(|member| {
            Some(Member {
                id: child_text(&member, "id")?,
                name: child_text(&member, "name").unwrap_or_default(),
            })
        })
        .collect();

    Ok(members)
}

/// Leaf fields of the `<general>` section of a computer or mobile device record
pub fn parse_general_info(xml: &str) -> Result<Vec<(String, String)>> {
    let doc = Document::parse(xml).context("Failed to parse device record XML")?;

    let general = doc
        .descendants()
        .find(|n| n.has_tag_name("general"))
        .context("Record has no <general> section")?;

    Ok(general
        .children()
        .filter(|n| n.is_element() && !n.children().any(|c| c.is_element()))
        .map(|n| {
            (
                n.tag_name().name().to_string(),
                n.text().map(|t| t.trim().to_string()).unwrap_or_default(),
            )
        })
        .collect())
}

fn child_text(node: &Node, tag: &str) -> Option<String> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
}
