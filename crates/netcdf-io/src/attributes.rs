//! Ordered attribute mapping.
//!
//! NetCDF keeps attributes in creation order and tools such as `ncdump`
//! display them that way, so the mapping preserves insertion order instead of
//! hashing. Values are the typed variants provided by the `netcdf` crate, which
//! lets numeric and string attributes be copied between files without changing
//! their on-disk type.

use netcdf::AttributeValue;

/// An ordered mapping from attribute name to typed value.
///
/// Inserting a key that is already present replaces the value in place and
/// keeps the original position.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every attribute from an iterator of NetCDF attributes.
    pub(crate) fn from_netcdf<'a>(
        attributes: impl Iterator<Item = netcdf::Attribute<'a>>,
    ) -> Result<Self, netcdf::Error> {
        let mut map = Self::new();
        for attr in attributes {
            let value = attr.value()?;
            map.insert(attr.name(), value);
        }
        Ok(map)
    }

    /// Insert or replace an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Get an attribute if it holds a single string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            AttributeValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get a numeric scalar attribute widened to `f64`.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        let value = match self.get(name)? {
            AttributeValue::Uchar(v) => f64::from(*v),
            AttributeValue::Schar(v) => f64::from(*v),
            AttributeValue::Ushort(v) => f64::from(*v),
            AttributeValue::Short(v) => f64::from(*v),
            AttributeValue::Uint(v) => f64::from(*v),
            AttributeValue::Int(v) => f64::from(*v),
            AttributeValue::Ulonglong(v) => *v as f64,
            AttributeValue::Longlong(v) => *v as f64,
            AttributeValue::Float(v) => f64::from(*v),
            AttributeValue::Double(v) => *v,
            _ => return None,
        };
        Some(value)
    }

    /// Remove an attribute, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// A copy of this mapping with `name` filtered out, order preserved.
    pub fn without(&self, name: &str) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(key, _)| key != name)
                .cloned()
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numeric contents of an attribute, widened to `f64`.
///
/// Strings and string arrays yield `None`.
pub fn numeric_values(value: &AttributeValue) -> Option<Vec<f64>> {
    fn widen<T: Copy + Into<f64>>(v: &[T]) -> Vec<f64> {
        v.iter().map(|&x| x.into()).collect()
    }
    let values = match value {
        AttributeValue::Uchar(v) => vec![f64::from(*v)],
        AttributeValue::Uchars(v) => widen(v),
        AttributeValue::Schar(v) => vec![f64::from(*v)],
        AttributeValue::Schars(v) => widen(v),
        AttributeValue::Ushort(v) => vec![f64::from(*v)],
        AttributeValue::Ushorts(v) => widen(v),
        AttributeValue::Short(v) => vec![f64::from(*v)],
        AttributeValue::Shorts(v) => widen(v),
        AttributeValue::Uint(v) => vec![f64::from(*v)],
        AttributeValue::Uints(v) => widen(v),
        AttributeValue::Int(v) => vec![f64::from(*v)],
        AttributeValue::Ints(v) => widen(v),
        AttributeValue::Ulonglong(v) => vec![*v as f64],
        AttributeValue::Ulonglongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Longlong(v) => vec![*v as f64],
        AttributeValue::Longlongs(v) => v.iter().map(|&x| x as f64).collect(),
        AttributeValue::Float(v) => vec![f64::from(*v)],
        AttributeValue::Floats(v) => widen(v),
        AttributeValue::Double(v) => vec![*v],
        AttributeValue::Doubles(v) => v.clone(),
        _ => return None,
    };
    Some(values)
}

/// Convert a numeric attribute to double precision.
pub fn to_double(value: &AttributeValue) -> Option<AttributeValue> {
    let values = numeric_values(value)?;
    Some(match values.as_slice() {
        [single] => AttributeValue::Double(*single),
        _ => AttributeValue::Doubles(values),
    })
}

/// Convert a numeric attribute to single precision.
pub fn to_float(value: &AttributeValue) -> Option<AttributeValue> {
    let values = numeric_values(value)?;
    Some(match values.as_slice() {
        [single] => AttributeValue::Float(*single as f32),
        _ => AttributeValue::Floats(values.iter().map(|&v| v as f32).collect()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert("Conventions", "CF-1.6");
        map.insert("history", "created by model run");
        map.insert("institution", "NCEP");
        map.insert("version", 3i32);
        map
    }

    #[test]
    fn test_insertion_order_is_iteration_order() {
        let map = sample();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["Conventions", "history", "institution", "version"]);
    }

    #[test]
    fn test_insert_existing_key_replaces_in_place() {
        let mut map = sample();
        map.insert("history", "rewritten");

        assert_eq!(map.len(), 4);
        assert_eq!(map.get_str("history"), Some("rewritten"));
        assert_eq!(map.keys().nth(1), Some("history"));
    }

    #[test]
    fn test_without_filters_one_key() {
        let map = sample();
        let filtered = map.without("history");

        assert_eq!(filtered.len(), 3);
        assert!(filtered.get("history").is_none());
        let keys: Vec<&str> = filtered.keys().collect();
        assert_eq!(keys, vec!["Conventions", "institution", "version"]);
        // Source mapping is untouched
        assert!(map.get("history").is_some());
    }

    #[test]
    fn test_typed_getters() {
        let map = sample();
        assert_eq!(map.get_str("institution"), Some("NCEP"));
        assert_eq!(map.get_str("version"), None);
        assert_eq!(map.get_f64("version"), Some(3.0));
        assert_eq!(map.get_f64("institution"), None);
        assert!(map.get("missing").is_none());
    }

    #[test]
    fn test_remove() {
        let mut map = sample();
        assert!(map.remove("institution").is_some());
        assert!(map.remove("institution").is_none());
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_to_double_keeps_nan_and_arity() {
        match to_double(&AttributeValue::Float(f32::NAN)) {
            Some(AttributeValue::Double(v)) => assert!(v.is_nan()),
            other => panic!("expected Double, got {:?}", other),
        }
        assert!(matches!(
            to_double(&AttributeValue::Shorts(vec![-90, 90])),
            Some(AttributeValue::Doubles(v)) if v == vec![-90.0, 90.0]
        ));
        assert!(to_double(&AttributeValue::Str("x".to_string())).is_none());
    }

    #[test]
    fn test_to_float() {
        assert!(matches!(
            to_float(&AttributeValue::Double(0.5)),
            Some(AttributeValue::Float(v)) if v == 0.5
        ));
        assert!(matches!(
            to_float(&AttributeValue::Ints(vec![0, 100])),
            Some(AttributeValue::Floats(v)) if v == vec![0.0, 100.0]
        ));
    }
}
