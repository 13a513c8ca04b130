//! Material text parser: MTL-like property bags keyed by material name.
//!
//! Like the mesh parser this never fails: unknown directives are skipped and
//! malformed operands drop only the directive they appear on. Texture maps
//! come back as opaque filename strings; resolving them is the scene
//! composer's collaborator's job.

use std::collections::HashMap;

use crate::directive::{parse_floats, split_directive, strip_comment};

/// Properties parsed for one `newmtl` block.
///
/// Everything is optional: partial specification is the norm, and the scene
/// composer resolves missing fields against the default bag field by field.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialData {
    pub diffuse: Option<[f32; 3]>,
    pub ambient: Option<[f32; 3]>,
    pub specular: Option<[f32; 3]>,
    pub emissive: Option<[f32; 3]>,
    pub shininess: Option<f32>,
    pub opacity: Option<f32>,
    pub diffuse_map: Option<String>,
    pub specular_map: Option<String>,
    pub normal_map: Option<String>,
}

/// Parse the concatenation of one or more material-library texts.
pub fn parse_mtl(text: &str) -> HashMap<String, MaterialData> {
    let mut materials = HashMap::new();
    let mut current: Option<(String, MaterialData)> = None;

    for (line_no, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let (tag, rest) = split_directive(line);

        if tag == "newmtl" {
            if let Some((name, material)) = current.take() {
                materials.insert(name, material);
            }
            current = Some((rest.to_string(), MaterialData::default()));
            continue;
        }
        let Some((_, material)) = current.as_mut() else {
            log::debug!(
                "directive '{}' before any newmtl on line {}",
                tag,
                line_no + 1
            );
            continue;
        };

        match tag {
            "Kd" => set_rgb(&mut material.diffuse, rest, tag, line_no),
            "Ka" => set_rgb(&mut material.ambient, rest, tag, line_no),
            "Ks" => set_rgb(&mut material.specular, rest, tag, line_no),
            "Ke" => set_rgb(&mut material.emissive, rest, tag, line_no),
            "Ns" => set_scalar(&mut material.shininess, rest, tag, line_no),
            "d" => set_scalar(&mut material.opacity, rest, tag, line_no),
            // Transparency is the complement of opacity; whichever of
            // `d`/`Tr` comes last wins.
            "Tr" => {
                let mut transparency = None;
                set_scalar(&mut transparency, rest, tag, line_no);
                if let Some(value) = transparency {
                    material.opacity = Some(1.0 - value);
                }
            }
            "map_Kd" => material.diffuse_map = Some(parse_map_args(rest)),
            "map_Ns" => material.specular_map = Some(parse_map_args(rest)),
            "map_Bump" | "bump" => material.normal_map = Some(parse_map_args(rest)),
            _ => log::debug!("unhandled directive '{}' on line {}", tag, line_no + 1),
        }
    }
    if let Some((name, material)) = current {
        materials.insert(name, material);
    }

    materials
}

fn set_rgb(field: &mut Option<[f32; 3]>, rest: &str, tag: &str, line_no: usize) {
    match parse_floats(rest) {
        Some(values) if values.len() >= 3 => *field = Some([values[0], values[1], values[2]]),
        _ => log::warn!("skipping malformed '{}' directive on line {}", tag, line_no + 1),
    }
}

fn set_scalar(field: &mut Option<f32>, rest: &str, tag: &str, line_no: usize) {
    match parse_floats(rest) {
        Some(values) if !values.is_empty() => *field = Some(values[0]),
        _ => log::warn!("skipping malformed '{}' directive on line {}", tag, line_no + 1),
    }
}

/// A map directive may carry option flags before the filename
/// (`map_Bump -bm 0.4 brick_n.png`); the filename is the last token that
/// does not parse as a number.
fn parse_map_args(rest: &str) -> String {
    rest.split_whitespace()
        .rev()
        .find(|token| token.parse::<f32>().is_err())
        .unwrap_or(rest)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_properties() {
        let text = "\
newmtl brick
Kd 0.8 0.2 0.2
Ka 0.1 0.1 0.1
Ks 1 1 1
Ns 96.0
d 0.75
";
        let materials = parse_mtl(text);
        let brick = &materials["brick"];
        assert_eq!(brick.diffuse, Some([0.8, 0.2, 0.2]));
        assert_eq!(brick.ambient, Some([0.1, 0.1, 0.1]));
        assert_eq!(brick.specular, Some([1.0, 1.0, 1.0]));
        assert_eq!(brick.shininess, Some(96.0));
        assert_eq!(brick.opacity, Some(0.75));
        assert_eq!(brick.emissive, None);
    }

    #[test]
    fn transparency_is_complement_of_opacity() {
        let materials = parse_mtl("newmtl a\nTr 0.3\n");
        assert_eq!(materials["a"].opacity, Some(0.7));
    }

    #[test]
    fn later_opacity_directive_wins() {
        let materials = parse_mtl("newmtl a\nTr 0.3\nd 0.9\n");
        assert_eq!(materials["a"].opacity, Some(0.9));

        let materials = parse_mtl("newmtl a\nd 0.9\nTr 0.3\n");
        assert_eq!(materials["a"].opacity, Some(0.7));
    }

    #[test]
    fn map_options_are_stripped_to_the_filename() {
        let materials = parse_mtl("newmtl a\nmap_Bump -bm 0.5 brick_n.png\nmap_Kd brick.png\n");
        assert_eq!(materials["a"].normal_map.as_deref(), Some("brick_n.png"));
        assert_eq!(materials["a"].diffuse_map.as_deref(), Some("brick.png"));
    }

    #[test]
    fn bump_alias_sets_the_normal_map() {
        let materials = parse_mtl("newmtl a\nbump brick_n.png\n");
        assert_eq!(materials["a"].normal_map.as_deref(), Some("brick_n.png"));
    }

    #[test]
    fn multiple_materials_flush_in_order() {
        let text = "\
newmtl first
Kd 1 0 0
newmtl second
Kd 0 1 0
";
        let materials = parse_mtl(text);
        assert_eq!(materials.len(), 2);
        assert_eq!(materials["first"].diffuse, Some([1.0, 0.0, 0.0]));
        assert_eq!(materials["second"].diffuse, Some([0.0, 1.0, 0.0]));
    }

    #[test]
    fn unknown_and_malformed_directives_are_skipped() {
        let text = "\
newmtl a
illum 2
Ni 1.45
Kd 1 oops 0
Ns 10
";
        let materials = parse_mtl(text);
        assert_eq!(materials["a"].diffuse, None);
        assert_eq!(materials["a"].shininess, Some(10.0));
    }

    #[test]
    fn directives_before_newmtl_are_ignored() {
        assert!(parse_mtl("Kd 1 1 1\n").is_empty());
        assert!(parse_mtl("").is_empty());
    }
}
