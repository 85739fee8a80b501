//! Graphics binding handles
//!
//! The kernel records references to GPU resources but never creates, uploads,
//! or releases them. Every handle here is an opaque, pre-validated identifier
//! supplied by the rendering backend.

use serde::{Deserialize, Serialize};

/// Handle to a vertex (array) buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayBufferHandle(pub u64);

/// Handle to an index buffer owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBufferHandle(pub u64);

/// Handle to a 2D texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Texture2DHandle(pub u64);

/// Handle to a cube map texture owned by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureCubeHandle(pub u64);

/// Minification filter for sampled textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFilterMinification {
    /// Nearest texel
    Nearest,
    /// Bilinear filtering
    Linear,
    /// Trilinear filtering across mip levels
    LinearMipmapLinear,
}

/// Magnification filter for sampled textures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureFilterMagnification {
    /// Nearest texel
    Nearest,
    /// Bilinear filtering
    Linear,
}

/// Precision of a depth buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthPrecision {
    /// 16-bit depth
    Depth16,
    /// 24-bit depth
    Depth24,
    /// 32-bit floating point depth
    Depth32F,
}

/// Precision of a two-channel variance depth buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepthVariancePrecision {
    /// 16-bit floating point moments
    Rg16F,
    /// 32-bit floating point moments
    Rg32F,
}

/// Geometry referenced by an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mesh {
    /// Vertex data
    pub array_buffer: ArrayBufferHandle,
    /// Index data
    pub index_buffer: IndexBufferHandle,
}

impl Mesh {
    /// Create a mesh reference from its buffers
    pub const fn new(array_buffer: ArrayBufferHandle, index_buffer: IndexBufferHandle) -> Self {
        Self {
            array_buffer,
            index_buffer,
        }
    }
}
