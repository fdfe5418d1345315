use cgmath::Vector2;
use serde_json::{Map, Value};

use crate::error::PropertyError;
use crate::services::TextureCrop;

pub const HAS_PHYSICS_KEY: &str = "__hasPhysics";
pub const DEPTH_KEY: &str = "__depth";

/// Construction parameters for one entity instance in a level file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: Map<String, Value>,
}

impl PropertyBag {
    pub fn from_value(value: &Value) -> Result<Self, PropertyError> {
        match value {
            Value::Object(values) => Ok(Self {
                values: values.clone(),
            }),
            _ => Err(PropertyError::NotAnObject),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Whether the instance joins the physics set. Follows loose truthiness:
    /// `true`, non-zero numbers, non-empty strings, arrays and objects.
    pub fn has_physics(&self) -> bool {
        self.get(HAS_PHYSICS_KEY).is_some_and(is_truthy)
    }

    pub fn depth(&self) -> Option<f32> {
        self.get(DEPTH_KEY).and_then(Value::as_f64).map(|d| d as f32)
    }

    pub fn f32(&self, key: &str) -> Result<f32, PropertyError> {
        let value = self
            .get(key)
            .ok_or_else(|| PropertyError::Missing(key.to_string()))?;
        value
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| wrong_type(key, "a number"))
    }

    pub fn f32_or(&self, key: &str, default: f32) -> Result<f32, PropertyError> {
        if self.contains(key) {
            self.f32(key)
        } else {
            Ok(default)
        }
    }

    pub fn vec2(&self, key: &str) -> Result<Vector2<f32>, PropertyError> {
        let value = self
            .get(key)
            .ok_or_else(|| PropertyError::Missing(key.to_string()))?;
        let pair = value
            .as_array()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| wrong_type(key, "a pair of numbers"))?;
        match (pair[0].as_f64(), pair[1].as_f64()) {
            (Some(x), Some(y)) => Ok(Vector2::new(x as f32, y as f32)),
            _ => Err(wrong_type(key, "a pair of numbers")),
        }
    }

    /// `position`, or the older separate `x` and `y` keys.
    pub fn position(&self) -> Result<Vector2<f32>, PropertyError> {
        if self.contains("position") || !(self.contains("x") && self.contains("y")) {
            return self.vec2("position");
        }
        Ok(Vector2::new(self.f32("x")?, self.f32("y")?))
    }

    pub fn size_or(&self, default: Vector2<f32>) -> Result<Vector2<f32>, PropertyError> {
        if self.contains("size") {
            self.vec2("size")
        } else {
            Ok(default)
        }
    }

    pub fn string(&self, key: &str) -> Result<&str, PropertyError> {
        self.get(key)
            .ok_or_else(|| PropertyError::Missing(key.to_string()))?
            .as_str()
            .ok_or_else(|| wrong_type(key, "a string"))
    }

    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> Result<&'a str, PropertyError> {
        if self.contains(key) {
            self.string(key)
        } else {
            Ok(default)
        }
    }

    /// Texture crop from `lowerLeft` and `upperRight`, when both are given.
    pub fn texture_crop(&self) -> Result<Option<TextureCrop>, PropertyError> {
        if !(self.contains("lowerLeft") && self.contains("upperRight")) {
            return Ok(None);
        }
        let lower_left = self.vec2("lowerLeft")?;
        let upper_right = self.vec2("upperRight")?;
        Ok(Some(TextureCrop::from_corners(
            lower_left.into(),
            upper_right.into(),
        )))
    }
}

impl TryFrom<&Value> for PropertyBag {
    type Error = PropertyError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn wrong_type(key: &str, expected: &'static str) -> PropertyError {
    PropertyError::WrongType {
        key: key.to_string(),
        expected,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
