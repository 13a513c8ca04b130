//! Attribute synthesis: fills in whatever the mesh text left out.

use crate::mesh::{Attribute, VertexData};

/// Fallback tuples for streams no face vertex supplied.
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const DEFAULT_TEXCOORD: [f32; 2] = [0.0, 0.0];
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];
pub const DEFAULT_TANGENT: [f32; 3] = [1.0, 0.0, 0.0];

/// Ensure all five standard streams are present: varying data where the
/// parser produced it, constant fallbacks everywhere else.
///
/// Running this on an already-complete geometry changes nothing. The normal
/// fallback is a flat `+Z` facing, not an estimate from the surface.
pub fn synthesize_attributes(data: &mut VertexData) {
    // A color stream whose float count exactly matches the position stream's
    // is RGB per vertex (convention inherited from the export pipeline).
    // Alpha is never fabricated for it.
    let position_len = data.position.len();
    if let Some(Attribute::Varying {
        components,
        data: values,
    }) = &mut data.color
    {
        if values.len() == position_len {
            *components = 3;
        }
    } else if data.color.is_none() {
        data.color = Some(Attribute::constant(&DEFAULT_COLOR));
    }

    // Tangents need a real texcoord/normal pair; constants give the solve
    // nothing to work with.
    if data.tangent.is_none() {
        let tangent = match (&data.texcoord, &data.normal) {
            (Some(Attribute::Varying { data: uv, .. }), Some(Attribute::Varying { .. })) => {
                Attribute::varying(3, generate_tangents(&data.position, uv))
            }
            _ => Attribute::constant(&DEFAULT_TANGENT),
        };
        data.tangent = Some(tangent);
    }

    if data.texcoord.is_none() {
        data.texcoord = Some(Attribute::constant(&DEFAULT_TEXCOORD));
    }
    if data.normal.is_none() {
        data.normal = Some(Attribute::constant(&DEFAULT_NORMAL));
    }
}

/// Per-triangle tangents for an unwelded position/texcoord pair.
///
/// For every 3 consecutive vertices the texture-space edge system is solved
/// with the determinant-based 2x2 inverse and the resulting tangent is added
/// into all three vertices. A degenerate texture basis contributes a zero
/// vector. Magnitudes are kept as computed; there is no normalization or
/// averaging pass afterwards.
pub fn generate_tangents(position: &[f32], texcoord: &[f32]) -> Vec<f32> {
    let num_faces = (position.len() / 9).min(texcoord.len() / 6);
    let mut tangents = vec![0.0f32; num_faces * 9];

    for face in 0..num_faces {
        let p = &position[face * 9..face * 9 + 9];
        let uv = &texcoord[face * 6..face * 6 + 6];

        let dp12 = sub3(&p[3..6], &p[0..3]);
        let dp13 = sub3(&p[6..9], &p[0..3]);
        let duv12 = [uv[2] - uv[0], uv[3] - uv[1]];
        let duv13 = [uv[4] - uv[0], uv[5] - uv[1]];

        let f = 1.0 / (duv12[0] * duv13[1] - duv13[0] * duv12[1]);
        if !f.is_finite() {
            continue;
        }
        let tangent = [
            f * (duv13[1] * dp12[0] - duv12[1] * dp13[0]),
            f * (duv13[1] * dp12[1] - duv12[1] * dp13[1]),
            f * (duv13[1] * dp12[2] - duv12[1] * dp13[2]),
        ];
        for vert in 0..3 {
            let at = face * 9 + vert * 3;
            tangents[at] += tangent[0];
            tangents[at + 1] += tangent[1];
            tangents[at + 2] += tangent[2];
        }
    }
    tangents
}

fn sub3(a: &[f32], b: &[f32]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_with(texcoord: Option<Attribute>, normal: Option<Attribute>) -> VertexData {
        VertexData {
            position: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            texcoord,
            normal,
            color: None,
            tangent: None,
        }
    }

    fn unit_uvs() -> Attribute {
        Attribute::varying(2, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
    }

    fn flat_normals() -> Attribute {
        Attribute::varying(3, vec![0.0, 0.0, 1.0].repeat(3))
    }

    #[test]
    fn bare_positions_get_constant_fallbacks() {
        let mut data = triangle_with(None, None);
        synthesize_attributes(&mut data);
        assert!(data.is_complete());
        assert_eq!(data.texcoord, Some(Attribute::constant(&DEFAULT_TEXCOORD)));
        assert_eq!(data.normal, Some(Attribute::constant(&DEFAULT_NORMAL)));
        assert_eq!(data.color, Some(Attribute::constant(&DEFAULT_COLOR)));
        assert_eq!(data.tangent, Some(Attribute::constant(&DEFAULT_TANGENT)));
    }

    #[test]
    fn synthesis_is_idempotent() {
        let mut data = triangle_with(Some(unit_uvs()), Some(flat_normals()));
        synthesize_attributes(&mut data);
        let complete = data.clone();
        synthesize_attributes(&mut data);
        assert_eq!(data, complete);
    }

    #[test]
    fn matching_color_length_is_retagged_rgb() {
        let mut data = triangle_with(None, None);
        data.color = Some(Attribute::varying(4, vec![0.5; 9]));
        synthesize_attributes(&mut data);
        match data.color {
            Some(Attribute::Varying { components, .. }) => assert_eq!(components, 3),
            other => panic!("expected varying color, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_color_length_keeps_its_tag() {
        let mut data = triangle_with(None, None);
        data.color = Some(Attribute::varying(4, vec![0.5; 12]));
        synthesize_attributes(&mut data);
        match data.color {
            Some(Attribute::Varying { components, .. }) => assert_eq!(components, 4),
            other => panic!("expected varying color, got {other:?}"),
        }
    }

    #[test]
    fn tangents_need_both_varying_streams() {
        let mut only_uv = triangle_with(Some(unit_uvs()), None);
        synthesize_attributes(&mut only_uv);
        assert_eq!(only_uv.tangent, Some(Attribute::constant(&DEFAULT_TANGENT)));

        let mut constant_uv = triangle_with(
            Some(Attribute::constant(&DEFAULT_TEXCOORD)),
            Some(flat_normals()),
        );
        synthesize_attributes(&mut constant_uv);
        assert_eq!(
            constant_uv.tangent,
            Some(Attribute::constant(&DEFAULT_TANGENT))
        );
    }

    #[test]
    fn axis_aligned_uvs_give_the_x_tangent() {
        let mut data = triangle_with(Some(unit_uvs()), Some(flat_normals()));
        synthesize_attributes(&mut data);
        let tangent = data.tangent.as_ref().expect("tangent stream");
        assert!(tangent.is_varying());
        assert_eq!(tangent.data(), &[1.0, 0.0, 0.0].repeat(3)[..]);
    }

    #[test]
    fn degenerate_uv_basis_contributes_zero() {
        let uvs = Attribute::varying(2, vec![0.25, 0.25].repeat(3));
        let mut data = triangle_with(Some(uvs), Some(flat_normals()));
        synthesize_attributes(&mut data);
        assert_eq!(data.tangent.as_ref().unwrap().data(), &[0.0; 9][..]);
    }

    #[test]
    fn tangent_count_matches_vertex_count() {
        let position: Vec<f32> = (0..18).map(|i| i as f32).collect();
        let texcoord: Vec<f32> = (0..12).map(|i| (i % 3) as f32).collect();
        let tangents = generate_tangents(&position, &texcoord);
        assert_eq!(tangents.len(), position.len());
    }
}
