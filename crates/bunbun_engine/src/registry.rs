use std::collections::HashMap;

use log::warn;

use crate::error::{EngineError, PropertyError};
use crate::object::GameObject;
use crate::properties::PropertyBag;

pub type EntityFactory = fn(&PropertyBag) -> Result<GameObject, PropertyError>;

/// Maps the type names used in level files to entity constructors.
#[derive(Default, Clone)]
pub struct EntityRegistry {
    factories: HashMap<String, EntityFactory>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, type_name: &str, factory: EntityFactory) -> &mut Self {
        if self
            .factories
            .insert(type_name.to_string(), factory)
            .is_some()
        {
            warn!("entity type `{type_name}` registered twice, keeping the last one");
        }
        self
    }

    pub fn with(mut self, type_name: &str, factory: EntityFactory) -> Self {
        self.register(type_name, factory);
        self
    }

    pub fn get(&self, type_name: &str) -> Option<EntityFactory> {
        self.factories.get(type_name).copied()
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn construct(
        &self,
        type_name: &str,
        properties: &PropertyBag,
    ) -> Result<GameObject, EngineError> {
        let factory = self
            .get(type_name)
            .ok_or_else(|| EngineError::UnknownEntityType(type_name.to_string()))?;
        factory(properties).map_err(|source| EngineError::Property {
            type_name: type_name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{Behavior, Drawable, ObjectState, Updatable};
    use crate::services::Renderable;
    use bunbun_core::Transform2D;
    use serde_json::json;
    use std::any::Any;

    struct Marker;
    impl Updatable for Marker {}
    impl Drawable for Marker {}
    impl Behavior for Marker {
        fn class(&self) -> &'static str {
            "Marker"
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn marker(props: &PropertyBag) -> Result<GameObject, PropertyError> {
        let p = props.position()?;
        Ok(GameObject::new(
            ObjectState::new(Transform2D::new(p.x, p.y, 1.0, 1.0), Renderable::Hidden),
            Marker,
        ))
    }

    #[test]
    fn constructs_registered_types() {
        let registry = EntityRegistry::new().with("Marker", marker);
        let props = PropertyBag::from_value(&json!({"position": [3, 4]})).unwrap();

        let object = registry.construct("Marker", &props).unwrap();

        assert_eq!(object.class(), "Marker");
        assert_eq!(object.transform().position.x, 3.0);
        assert!(object.behavior::<Marker>().is_some());
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = EntityRegistry::new().with("Marker", marker);
        let err = registry
            .construct("Dragon", &PropertyBag::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownEntityType(name) if name == "Dragon"));
    }

    #[test]
    fn bad_properties_name_the_type() {
        let registry = EntityRegistry::new().with("Marker", marker);
        let err = registry
            .construct("Marker", &PropertyBag::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::Property { type_name, .. } if type_name == "Marker"));
    }
}
