//=========================================================================
// Scene Arguments
//=========================================================================
//
// Named, type-erased values handed to `Scene::awake` and
// `Scene::on_restart` when a scene is started.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

//=== SceneArgs ===========================================================

/// Named arguments passed along a navigation request.
///
/// Values are moved in by the caller and taken out (or borrowed) by the
/// receiving scene. Lookups with the wrong type behave as if the name
/// were absent.
#[derive(Default)]
pub struct SceneArgs {
    values: HashMap<&'static str, Box<dyn Any>>,
}

impl SceneArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named value, builder style.
    pub fn with<T: Any>(mut self, name: &'static str, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<T: Any>(&mut self, name: &'static str, value: T) {
        self.values.insert(name, Box::new(value));
    }

    /// Borrows a value of type `T`.
    pub fn get<T: Any>(&self, name: &str) -> Option<&T> {
        self.values.get(name)?.downcast_ref::<T>()
    }

    /// Removes and returns a value of type `T`.
    ///
    /// A value stored under `name` with another type is left in place.
    pub fn take<T: Any>(&mut self, name: &str) -> Option<T> {
        if !self.values.get(name)?.is::<T>() {
            return None;
        }
        let value = self.values.remove(name)?;
        value.downcast::<T>().ok().map(|boxed| *boxed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for SceneArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.values.keys().collect();
        names.sort();
        f.debug_struct("SceneArgs").field("names", &names).finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookup() {
        let args = SceneArgs::new().with("level", 3u32).with("name", String::from("forest"));

        assert_eq!(args.get::<u32>("level"), Some(&3));
        assert_eq!(args.get::<String>("name").map(String::as_str), Some("forest"));
        assert_eq!(args.get::<i64>("level"), None);
        assert_eq!(args.get::<u32>("missing"), None);
    }

    #[test]
    fn take_moves_value_out() {
        let mut args = SceneArgs::new().with("items", vec![1, 2, 3]);

        assert_eq!(args.take::<Vec<i32>>("items"), Some(vec![1, 2, 3]));
        assert!(args.is_empty());
    }

    #[test]
    fn take_with_wrong_type_keeps_value() {
        let mut args = SceneArgs::new().with("score", 10i32);

        assert_eq!(args.take::<u8>("score"), None);
        assert!(args.contains("score"));
    }
}
