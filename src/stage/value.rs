//! Typed attribute values carried by scene-document nodes.

use crate::math::{Rgb, Vec3};
use serde::{Deserialize, Serialize};

/// A typed attribute value. Attributes keep whatever type they were last
/// authored with; consumers read them back through the `as_*` accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Vec3(Vec3),
    Color(Rgb),
    Token(String),
    FloatArray(Vec<f32>),
    IntArray(Vec<i64>),
    Vec3Array(Vec<Vec3>),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgb> {
        match self {
            Self::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for AttrValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<Rgb> for AttrValue {
    fn from(v: Rgb) -> Self {
        Self::Color(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Token(v.to_string())
    }
}
