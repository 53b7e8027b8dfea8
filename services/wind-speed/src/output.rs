//! Output stage: provenance-chained global attributes plus the derived field.

use std::path::Path;

use netcdf_io::{write_field, AttributeMap, Field};
use tracing::{debug, info};

use crate::error::{WindSpeedError, WindSpeedResult};
use crate::history::{chain_history, HISTORY};

/// Global attributes for the output file.
///
/// `history` comes first and holds `new_record` followed by the input history;
/// every other input attribute follows, unchanged and in input order. Fails if
/// the input has no string `history` attribute.
pub fn output_attributes(input: &AttributeMap, new_record: &str) -> WindSpeedResult<AttributeMap> {
    let old_history = input
        .get_str(HISTORY)
        .ok_or(WindSpeedError::MissingHistory)?;

    let mut attributes = AttributeMap::new();
    attributes.insert(HISTORY, chain_history(new_record, old_history));
    for (name, value) in input.without(HISTORY).iter() {
        attributes.insert(name, value.clone());
    }
    Ok(attributes)
}

/// Write `field` to `path` with the globals of the primary input file.
///
/// `stamp` produces the new history record; it is only called once the input
/// attributes are known to be usable, and the output file is only created
/// after that.
pub fn write_output<F>(
    field: &Field,
    input_attributes: &AttributeMap,
    path: &Path,
    stamp: F,
) -> WindSpeedResult<()>
where
    F: FnOnce() -> String,
{
    if input_attributes.get_str(HISTORY).is_none() {
        return Err(WindSpeedError::MissingHistory);
    }
    let record = stamp();
    let attributes = output_attributes(input_attributes, &record)?;
    debug!(record = %record, attributes = attributes.len(), "Built output attributes");

    write_field(path, field, &attributes)?;
    info!(file = %path.display(), variable = %field.name, "Wrote output file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use netcdf_io::AttributeValue;

    fn input() -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("Conventions", "CF-1.6");
        attrs.insert(HISTORY, "H1\nH0");
        attrs.insert("title", "Daily winds");
        attrs.insert("scale", 0.5f64);
        attrs
    }

    #[test]
    fn test_history_first_then_input_order() {
        let out = output_attributes(&input(), "NEW").unwrap();

        let keys: Vec<&str> = out.keys().collect();
        assert_eq!(keys, vec![HISTORY, "Conventions", "title", "scale"]);
        assert_eq!(out.get_str(HISTORY), Some("NEW\nH1\nH0"));
        assert_eq!(out.get_str("title"), Some("Daily winds"));
        assert!(matches!(out.get("scale"), Some(AttributeValue::Double(v)) if *v == 0.5));
    }

    #[test]
    fn test_missing_history_is_fatal() {
        let attrs = input().without(HISTORY);
        assert!(matches!(
            output_attributes(&attrs, "NEW"),
            Err(WindSpeedError::MissingHistory)
        ));
    }

    #[test]
    fn test_non_string_history_is_fatal() {
        let mut attrs = input();
        attrs.insert(HISTORY, 3i32);
        assert!(matches!(
            output_attributes(&attrs, "NEW"),
            Err(WindSpeedError::MissingHistory)
        ));
    }

    #[test]
    fn test_write_output_without_history_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wsp.nc");
        let field = Field::new("wsp", vec![1.0], vec![netcdf_io::Axis::new("x", 1)]);
        let mut stamped = false;

        let result = write_output(&field, &input().without(HISTORY), &path, || {
            stamped = true;
            String::new()
        });

        assert!(matches!(result, Err(WindSpeedError::MissingHistory)));
        assert!(!stamped);
        assert!(!path.exists());
    }
}
