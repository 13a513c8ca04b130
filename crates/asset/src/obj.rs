//! Mesh text parser: OBJ-like polygon geometry grouped by material.
//!
//! Permissive by contract. Unknown directives are skipped, malformed
//! operands drop only the directive they appear on, and face references that
//! resolve out of range degrade to attribute defaults. Any text input yields
//! a model, possibly with zero geometries.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::directive::{parse_floats, split_directive, strip_comment};
use crate::mesh::{Attribute, Geometry, ObjModel, VertexData};

/// Load an OBJ model from a file path.
pub fn load_obj_from_path(path: impl AsRef<Path>) -> Result<ObjModel> {
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read OBJ file: {}", path.as_ref().display()))?;
    Ok(parse_obj(&text))
}

/// Parse OBJ-like text into material-grouped geometries plus the list of
/// referenced material-library filenames.
///
/// Output vertices are unwelded: every face-vertex reference becomes one
/// output vertex, so all varying streams of a geometry share one length and
/// can be uploaded without an index buffer.
pub fn parse_obj(text: &str) -> ObjModel {
    let mut pools = Pools::default();
    let mut builder = GeometryBuilder::default();
    let mut geometries = Vec::new();
    let mut material_libs = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            continue;
        }
        let (tag, rest) = split_directive(line);
        match tag {
            "v" => pools.push_position(rest, line_no),
            "vt" => pools.push_texcoord(rest, line_no),
            "vn" => pools.push_normal(rest, line_no),
            "f" => builder.push_face(rest, &pools, line_no),
            "usemtl" => {
                builder.flush_into(&mut geometries);
                builder.material = Some(rest.to_string());
            }
            "o" => {
                builder.flush_into(&mut geometries);
                builder.name = (!rest.is_empty()).then(|| rest.to_string());
            }
            "g" => {
                builder.flush_into(&mut geometries);
                builder.name = (!rest.is_empty()).then(|| rest.to_string());
            }
            "mtllib" => material_libs.push(rest.to_string()),
            // Smoothing groups are not represented in the output.
            "s" => {}
            _ => log::debug!("unhandled directive '{}' on line {}", tag, line_no + 1),
        }
    }
    builder.flush_into(&mut geometries);

    ObjModel {
        geometries,
        material_libs,
    }
}

/// Running object-wide attribute pools. Face references index into these.
#[derive(Default)]
struct Pools {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
}

impl Pools {
    fn push_position(&mut self, rest: &str, line_no: usize) {
        let Some(fields) = parse_floats(rest) else {
            log::warn!("skipping malformed 'v' directive on line {}", line_no + 1);
            return;
        };
        if fields.len() < 3 {
            log::warn!("skipping short 'v' directive on line {}", line_no + 1);
            return;
        }
        self.positions.push([fields[0], fields[1], fields[2]]);
        // Export-pipeline convention: a 6-field position line carries a
        // per-vertex RGB color in its trailing fields.
        if fields.len() >= 6 {
            self.colors.push([fields[3], fields[4], fields[5]]);
        }
    }

    fn push_texcoord(&mut self, rest: &str, line_no: usize) {
        match parse_floats(rest) {
            Some(fields) if fields.len() >= 2 => self.texcoords.push([fields[0], fields[1]]),
            _ => log::warn!("skipping malformed 'vt' directive on line {}", line_no + 1),
        }
    }

    fn push_normal(&mut self, rest: &str, line_no: usize) {
        match parse_floats(rest) {
            Some(fields) if fields.len() >= 3 => {
                self.normals.push([fields[0], fields[1], fields[2]])
            }
            _ => log::warn!("skipping malformed 'vn' directive on line {}", line_no + 1),
        }
    }
}

/// One `p`, `p/t`, `p/t/n` or `p//n` reference from a face directive.
struct FaceVertex {
    position: i32,
    texcoord: Option<i32>,
    normal: Option<i32>,
}

fn parse_face_vertex(token: &str) -> Option<FaceVertex> {
    let mut split = token.split('/');
    let position = split.next()?.parse::<i32>().ok()?;
    let texcoord = split
        .next()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok());
    let normal = split
        .next()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok());
    Some(FaceVertex {
        position,
        texcoord,
        normal,
    })
}

/// 1-based with negative-relative indexing: `-1` is the pool's last element.
/// `0` and out-of-range references resolve to `None`.
fn resolve_index(raw: i32, len: usize) -> Option<usize> {
    if raw == 0 {
        return None;
    }
    let idx = if raw > 0 {
        raw as isize - 1
    } else {
        len as isize + raw as isize
    };
    (idx >= 0 && (idx as usize) < len).then_some(idx as usize)
}

/// Accumulates unwelded vertices for the geometry currently being built.
///
/// Every pushed vertex appends a tuple to all four streams so their lengths
/// stay in lockstep; the `*_seen` flags record whether any face vertex
/// actually supplied the attribute, and unseen streams are dropped at flush
/// so synthesis can install a constant instead.
#[derive(Default)]
struct GeometryBuilder {
    name: Option<String>,
    material: Option<String>,
    position: Vec<f32>,
    texcoord: Vec<f32>,
    normal: Vec<f32>,
    color: Vec<f32>,
    texcoord_seen: bool,
    normal_seen: bool,
    color_seen: bool,
}

impl GeometryBuilder {
    fn push_face(&mut self, rest: &str, pools: &Pools, line_no: usize) {
        let mut refs = Vec::new();
        for token in rest.split_whitespace() {
            match parse_face_vertex(token) {
                Some(vertex) => refs.push(vertex),
                None => {
                    log::warn!("skipping malformed 'f' directive on line {}", line_no + 1);
                    return;
                }
            }
        }
        if refs.len() < 3 {
            return;
        }
        // Fan triangulation from the first vertex. Fine for the convex and
        // quad-dominant faces this pipeline emits; wrong for concave
        // polygons.
        for tri in 0..refs.len() - 2 {
            self.push_vertex(&refs[0], pools);
            self.push_vertex(&refs[tri + 1], pools);
            self.push_vertex(&refs[tri + 2], pools);
        }
    }

    fn push_vertex(&mut self, vertex: &FaceVertex, pools: &Pools) {
        let pos_index = resolve_index(vertex.position, pools.positions.len());
        match pos_index.and_then(|i| pools.positions.get(i)) {
            Some(p) => self.position.extend_from_slice(p),
            None => self.position.extend_from_slice(&[0.0; 3]),
        }

        // Vertex colors ride along with the position index.
        match pos_index.and_then(|i| pools.colors.get(i)) {
            Some(c) => {
                self.color.extend_from_slice(c);
                self.color_seen = true;
            }
            None => self.color.extend_from_slice(&[1.0; 3]),
        }

        match vertex
            .texcoord
            .and_then(|raw| resolve_index(raw, pools.texcoords.len()))
            .and_then(|i| pools.texcoords.get(i))
        {
            Some(t) => {
                self.texcoord.extend_from_slice(t);
                self.texcoord_seen = true;
            }
            None => self.texcoord.extend_from_slice(&[0.0; 2]),
        }

        match vertex
            .normal
            .and_then(|raw| resolve_index(raw, pools.normals.len()))
            .and_then(|i| pools.normals.get(i))
        {
            Some(n) => {
                self.normal.extend_from_slice(n);
                self.normal_seen = true;
            }
            None => self.normal.extend_from_slice(&[0.0, 0.0, 1.0]),
        }
    }

    /// Close the current geometry if it accumulated any vertices. The active
    /// name/material carry over to the next one.
    fn flush_into(&mut self, geometries: &mut Vec<Geometry>) {
        if self.position.is_empty() {
            self.texcoord.clear();
            self.normal.clear();
            self.color.clear();
            return;
        }

        let texcoord = std::mem::take(&mut self.texcoord);
        let normal = std::mem::take(&mut self.normal);
        let color = std::mem::take(&mut self.color);
        let data = VertexData {
            position: std::mem::take(&mut self.position),
            texcoord: self.texcoord_seen.then(|| Attribute::varying(2, texcoord)),
            normal: self.normal_seen.then(|| Attribute::varying(3, normal)),
            color: self.color_seen.then(|| Attribute::varying(3, color)),
            tangent: None,
        };
        self.texcoord_seen = false;
        self.normal_seen = false;
        self.color_seen = false;

        geometries.push(Geometry {
            name: self.name.clone(),
            material: self.material.clone(),
            data,
        });
    }
}
