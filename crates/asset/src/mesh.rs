//! CPU-side geometry representation used by the text parsers.

/// One vertex attribute stream.
///
/// `Varying` carries one fixed-size tuple per vertex as a flat `f32` array;
/// `Constant` is a single tuple applied implicitly to every vertex of the
/// geometry it belongs to.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    Varying { components: usize, data: Vec<f32> },
    Constant(Vec<f32>),
}

impl Attribute {
    pub fn varying(components: usize, data: Vec<f32>) -> Self {
        Self::Varying { components, data }
    }

    pub fn constant(tuple: &[f32]) -> Self {
        Self::Constant(tuple.to_vec())
    }

    #[inline]
    pub fn is_varying(&self) -> bool {
        matches!(self, Self::Varying { .. })
    }

    /// Number of vertices covered by a varying stream; `None` for constants.
    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            Self::Varying { components, data } if *components > 0 => Some(data.len() / components),
            _ => None,
        }
    }

    pub fn data(&self) -> &[f32] {
        match self {
            Self::Varying { data, .. } => data,
            Self::Constant(tuple) => tuple,
        }
    }

    /// Raw byte view of the stream, for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data())
    }
}

/// The five standard streams of one geometry.
///
/// `position` is always varying (3 floats per vertex, unwelded). The rest
/// may be absent until [`crate::attributes::synthesize_attributes`] fills
/// them in; afterwards all of them are `Some`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexData {
    pub position: Vec<f32>,
    pub texcoord: Option<Attribute>,
    pub normal: Option<Attribute>,
    pub color: Option<Attribute>,
    pub tangent: Option<Attribute>,
}

impl VertexData {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    /// Position bytes for buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.position)
    }

    /// True once every standard stream is present.
    pub fn is_complete(&self) -> bool {
        self.texcoord.is_some()
            && self.normal.is_some()
            && self.color.is_some()
            && self.tangent.is_some()
    }
}

/// One material-grouped run of faces produced by the mesh parser.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub name: Option<String>,
    /// Material key to resolve against the parsed libraries; `None` means
    /// the default material.
    pub material: Option<String>,
    pub data: VertexData,
}

/// Parse result for one mesh text: ordered geometries plus the material
/// libraries it references.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjModel {
    pub geometries: Vec<Geometry>,
    pub material_libs: Vec<String>,
}

impl ObjModel {
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}
