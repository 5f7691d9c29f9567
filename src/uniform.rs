//! Per-draw uniform values.

use crate::gl;

/// A uniform value staged for upload at draw time.
///
/// Array uniforms are set by naming the first element (`"weights[0]"`)
/// and passing a flattened `*s` variant covering the whole array; the
/// value is otherwise treated opaquely until upload.
#[derive(Clone, Debug, PartialEq)]
pub enum Uniform {
    /// `float`
    Float(f32),

    /// `vec2`
    Vec2([f32; 2]),

    /// `vec3`
    Vec3([f32; 3]),

    /// `vec4`
    Vec4([f32; 4]),

    /// `int`, `bool`, or a sampler index.
    Int(i32),

    /// `ivec2`
    IntVec2([i32; 2]),

    /// `ivec3`
    IntVec3([i32; 3]),

    /// `ivec4`
    IntVec4([i32; 4]),

    /// `mat2`, column major.
    Mat2([f32; 4]),

    /// `mat3`, column major.
    Mat3([f32; 9]),

    /// `mat4`, column major.
    Mat4([f32; 16]),

    /// `float[N]`, flattened.
    Floats(Vec<f32>),

    /// `int[N]` or `bool[N]`, flattened.
    Ints(Vec<i32>),

    /// `vec2[N]`, flattened.
    Vec2s(Vec<f32>),

    /// `vec3[N]`, flattened.
    Vec3s(Vec<f32>),

    /// `vec4[N]`, flattened.
    Vec4s(Vec<f32>),

    /// `mat4[N]`, flattened, column major.
    Mat4s(Vec<f32>),
}

impl Uniform {
    /// Forwards the value to the matching upload entry point.
    pub(crate) fn upload(&self, backend: &gl::Backend, location: i32) {
        match *self {
            Uniform::Float(v) => backend.uniform1f(location, v),
            Uniform::Vec2(ref v) => backend.uniform2fv(location, 1, v),
            Uniform::Vec3(ref v) => backend.uniform3fv(location, 1, v),
            Uniform::Vec4(ref v) => backend.uniform4fv(location, 1, v),
            Uniform::Int(v) => backend.uniform1i(location, v),
            Uniform::IntVec2(ref v) => backend.uniform2iv(location, 1, v),
            Uniform::IntVec3(ref v) => backend.uniform3iv(location, 1, v),
            Uniform::IntVec4(ref v) => backend.uniform4iv(location, 1, v),
            Uniform::Mat2(ref v) => backend.uniform_matrix2fv(location, 1, v),
            Uniform::Mat3(ref v) => backend.uniform_matrix3fv(location, 1, v),
            Uniform::Mat4(ref v) => backend.uniform_matrix4fv(location, 1, v),
            Uniform::Floats(ref v) => backend.uniform1fv(location, v.len() as i32, v),
            Uniform::Ints(ref v) => backend.uniform1iv(location, v.len() as i32, v),
            Uniform::Vec2s(ref v) => backend.uniform2fv(location, (v.len() / 2) as i32, v),
            Uniform::Vec3s(ref v) => backend.uniform3fv(location, (v.len() / 3) as i32, v),
            Uniform::Vec4s(ref v) => backend.uniform4fv(location, (v.len() / 4) as i32, v),
            Uniform::Mat4s(ref v) => backend.uniform_matrix4fv(location, (v.len() / 16) as i32, v),
        }
    }
}

impl From<f32> for Uniform {
    fn from(value: f32) -> Self {
        Uniform::Float(value)
    }
}

impl From<[f32; 2]> for Uniform {
    fn from(value: [f32; 2]) -> Self {
        Uniform::Vec2(value)
    }
}

impl From<[f32; 3]> for Uniform {
    fn from(value: [f32; 3]) -> Self {
        Uniform::Vec3(value)
    }
}

impl From<[f32; 4]> for Uniform {
    fn from(value: [f32; 4]) -> Self {
        Uniform::Vec4(value)
    }
}

impl From<i32> for Uniform {
    fn from(value: i32) -> Self {
        Uniform::Int(value)
    }
}

impl From<bool> for Uniform {
    fn from(value: bool) -> Self {
        Uniform::Int(value as i32)
    }
}

impl From<[i32; 2]> for Uniform {
    fn from(value: [i32; 2]) -> Self {
        Uniform::IntVec2(value)
    }
}

impl From<[i32; 3]> for Uniform {
    fn from(value: [i32; 3]) -> Self {
        Uniform::IntVec3(value)
    }
}

impl From<[i32; 4]> for Uniform {
    fn from(value: [i32; 4]) -> Self {
        Uniform::IntVec4(value)
    }
}

impl From<[f32; 9]> for Uniform {
    fn from(value: [f32; 9]) -> Self {
        Uniform::Mat3(value)
    }
}

impl From<[f32; 16]> for Uniform {
    fn from(value: [f32; 16]) -> Self {
        Uniform::Mat4(value)
    }
}

impl From<Vec<f32>> for Uniform {
    fn from(value: Vec<f32>) -> Self {
        Uniform::Floats(value)
    }
}

impl From<Vec<i32>> for Uniform {
    fn from(value: Vec<i32>) -> Self {
        Uniform::Ints(value)
    }
}

impl<'a> From<&'a [f32]> for Uniform {
    fn from(value: &'a [f32]) -> Self {
        Uniform::Floats(value.to_vec())
    }
}

impl<'a> From<&'a [i32]> for Uniform {
    fn from(value: &'a [i32]) -> Self {
        Uniform::Ints(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::Uniform;

    #[test]
    fn conversions() {
        assert_eq!(Uniform::Float(1.0), Uniform::from(1.0f32));
        assert_eq!(Uniform::Int(1), Uniform::from(true));
        assert_eq!(Uniform::Vec3([0.0, 1.0, 2.0]), Uniform::from([0.0f32, 1.0, 2.0]));
        assert_eq!(
            Uniform::Floats(vec![0.5, 0.25]),
            Uniform::from(&[0.5f32, 0.25][..]),
        );
    }
}
