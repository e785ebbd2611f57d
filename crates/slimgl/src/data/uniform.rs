use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::backend::{Backend, NativeId};
use crate::types::UniformType;

/// Opaque container for a uniform's value.
///
/// Reflection stores each active uniform's current value here; typed access
/// goes through [`UniformValue::get`] or [`Uniform::from_value`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    UnsignedInt(u32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
    /// Sampler uniform. Reflection reports `None`: no texture is associated yet.
    Sampler(Option<i32>),
}

impl UniformValue {
    /// Extracts the value as `T`, or `None` if the container holds another type.
    #[inline]
    pub fn get<T: Uniform>(&self) -> Option<T> {
        T::from_value(*self)
    }

    /// Flattens the value into float components (column-major for matrices).
    pub(crate) fn to_f32s(self) -> Vec<f32> {
        match self {
            Self::Bool(b) => vec![if b { 1.0 } else { 0.0 }],
            Self::Int(v) => vec![v as f32],
            Self::UnsignedInt(v) => vec![v as f32],
            Self::Float(v) => vec![v],
            Self::Vec2(v) => v.to_array().to_vec(),
            Self::Vec3(v) => v.to_array().to_vec(),
            Self::Vec4(v) => v.to_array().to_vec(),
            Self::Mat3(m) => m.to_cols_array().to_vec(),
            Self::Mat4(m) => m.to_cols_array().to_vec(),
            Self::Sampler(unit) => vec![unit.unwrap_or(0) as f32],
        }
    }

    /// Flattens the value into integer components.
    pub(crate) fn to_i32s(self) -> Vec<i32> {
        match self {
            Self::Bool(b) => vec![b as i32],
            Self::Int(v) => vec![v],
            Self::UnsignedInt(v) => vec![v as i32],
            Self::Sampler(unit) => vec![unit.unwrap_or(0)],
            other => other.to_f32s().into_iter().map(|f| f as i32).collect(),
        }
    }
}

/// Types that can be sent to and read back from a shader uniform.
pub trait Uniform: Copy + Default {
    fn into_value(self) -> UniformValue;

    fn from_value(value: UniformValue) -> Option<Self>;

    /// Reads the current value at `location` from `program`.
    fn read(backend: &dyn Backend, program: NativeId, location: u32) -> Self;
}

impl Uniform for bool {
    fn into_value(self) -> UniformValue {
        UniformValue::Bool(self)
    }

    fn from_value(value: UniformValue) -> Option<Self> {
        match value {
            UniformValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    fn read(backend: &dyn Backend, program: NativeId, location: u32) -> Self {
        i32::read(backend, program, location) != 0
    }
}

impl Uniform for i32 {
    fn into_value(self) -> UniformValue {
        UniformValue::Int(self)
    }

    fn from_value(value: UniformValue) -> Option<Self> {
        match value {
            UniformValue::Int(v) => Some(v),
            _ => None,
        }
    }

    fn read(backend: &dyn Backend, program: NativeId, location: u32) -> Self {
        let mut out = [0i32; 1];
        backend.get_uniform_i32(program, location, &mut out);
        out[0]
    }
}

impl Uniform for u32 {
    fn into_value(self) -> UniformValue {
        UniformValue::UnsignedInt(self)
    }

    fn from_value(value: UniformValue) -> Option<Self> {
        match value {
            UniformValue::UnsignedInt(v) => Some(v),
            _ => None,
        }
    }

    fn read(backend: &dyn Backend, program: NativeId, location: u32) -> Self {
        let mut out = [0u32; 1];
        backend.get_uniform_u32(program, location, &mut out);
        out[0]
    }
}

/// Float-backed uniforms differ only in component count and constructor.
macro_rules! float_uniform {
    ($ty:ty, $variant:ident, $n:expr, |$arr:ident| $build:expr) => {
        impl Uniform for $ty {
            fn into_value(self) -> UniformValue {
                UniformValue::$variant(self)
            }

            fn from_value(value: UniformValue) -> Option<Self> {
                match value {
                    UniformValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn read(backend: &dyn Backend, program: NativeId, location: u32) -> Self {
                let mut $arr = [0f32; $n];
                backend.get_uniform_f32(program, location, &mut $arr);
                $build
            }
        }
    };
}

float_uniform!(f32, Float, 1, |a| a[0]);
float_uniform!(Vec2, Vec2, 2, |a| Vec2::from_array(a));
float_uniform!(Vec3, Vec3, 3, |a| Vec3::from_array(a));
float_uniform!(Vec4, Vec4, 4, |a| Vec4::from_array(a));
float_uniform!(Mat3, Mat3, 9, |a| Mat3::from_cols_array(&a));
float_uniform!(Mat4, Mat4, 16, |a| Mat4::from_cols_array(&a));

macro_rules! value_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for UniformValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    value.into_value()
                }
            }
        )+
    };
}

value_from!(bool, i32, u32, f32, Vec2, Vec3, Vec4, Mat3, Mat4);

/// Reflection data of one active uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformInfo {
    pub ty: UniformType,
    pub name: String,
    /// Value read back right after linking.
    pub default_value: UniformValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_round_trip_keeps_type() {
        let value = UniformValue::from(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(value.get::<Vec3>(), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(value.get::<Vec4>(), None);
        assert_eq!(value.get::<f32>(), None);
    }

    #[test]
    fn matrices_flatten_column_major() {
        let m = Mat3::from_cols(Vec3::X, Vec3::Y * 2.0, Vec3::Z * 3.0);
        let flat = UniformValue::Mat3(m).to_f32s();
        assert_eq!(flat, vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn bool_flattens_to_int() {
        assert_eq!(UniformValue::Bool(true).to_i32s(), vec![1]);
        assert_eq!(UniformValue::Sampler(None).to_i32s(), vec![0]);
    }
}
