use std::collections::HashSet;

use crate::error::Error;
use crate::record::{FieldKind, Record};

/// Check that every field of `record` holds a non-zero value of a supported
/// kind.
///
/// Fields are visited in declaration order and the first offending field is
/// reported. Fields never mentioned by any source fail the same way as fields
/// explicitly set to a zero value.
pub fn validate_record<R>(record: &R) -> Result<(), Error>
where
    R: Record + ?Sized,
{
    check_registry(record)?;
    check_fields(record)
}

/// The completeness pass alone, for callers that already ran
/// [`check_registry`].
pub(crate) fn check_fields<R>(record: &R) -> Result<(), Error>
where
    R: Record + ?Sized,
{
    for &name in record.field_names() {
        let Some(field) = record.field(name) else {
            return Err(unresolved(name));
        };

        match field.kind() {
            FieldKind::Integer | FieldKind::Text => {
                if field.is_zero() {
                    return Err(Error::FieldMustNotBeEmpty {
                        field: name.to_owned(),
                    });
                }
            }
            FieldKind::Unsupported => {
                return Err(Error::FieldMustBeStringOrInt {
                    field: name.to_owned(),
                });
            }
        }
    }

    Ok(())
}

/// Reject registries that list a name twice or list a name they cannot
/// resolve.
pub(crate) fn check_registry<R>(record: &R) -> Result<(), Error>
where
    R: Record + ?Sized,
{
    let mut seen = HashSet::new();
    for &name in record.field_names() {
        if !seen.insert(name) {
            return Err(Error::InvalidArgument(format!(
                "field `{name}` is declared more than once"
            )));
        }
        if record.field(name).is_none() {
            return Err(unresolved(name));
        }
    }
    Ok(())
}

fn unresolved(name: &str) -> Error {
    Error::InvalidArgument(format!("field `{name}` is declared but cannot be resolved"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    crate::record! {
        #[allow(non_snake_case)]
        #[derive(Debug, Default)]
        struct Settings {
            NAME: String,
            TIMEOUT: i32,
        }
    }

    crate::record! {
        #[allow(non_snake_case)]
        #[derive(Debug, Default)]
        struct WithFlag {
            NAME: String,
            ENABLED: bool,
        }
    }

    #[derive(Default)]
    struct Broken {
        name: String,
    }

    impl Record for Broken {
        fn field_names(&self) -> &'static [&'static str] {
            &["NAME", "NAME"]
        }

        fn field(&self, name: &str) -> Option<&dyn Field> {
            (name == "NAME").then_some(&self.name as &dyn Field)
        }

        fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field> {
            (name == "NAME").then_some(&mut self.name as &mut dyn Field)
        }
    }

    #[test]
    fn accepts_fully_populated_record() {
        let settings = Settings {
            NAME: "app".to_owned(),
            TIMEOUT: 30,
        };
        validate_record(&settings).expect("record should be complete");
    }

    #[test]
    fn negative_integers_are_not_zero() {
        let settings = Settings {
            NAME: "app".to_owned(),
            TIMEOUT: -1,
        };
        validate_record(&settings).expect("record should be complete");
    }

    #[test]
    fn reports_first_empty_field_in_declaration_order() {
        let err = validate_record(&Settings::default()).expect_err("expected error");
        match err {
            Error::FieldMustNotBeEmpty { field } => assert_eq!(field, "NAME"),
            other => panic!("unexpected error: {other:?}"),
        }

        let settings = Settings {
            NAME: "app".to_owned(),
            TIMEOUT: 0,
        };
        let err = validate_record(&settings).expect_err("expected error");
        assert_eq!(err.field(), Some("TIMEOUT"));
        assert_eq!(err.to_string(), "[TIMEOUT] must not be empty");
    }

    #[test]
    fn rejects_unsupported_field_kinds() {
        let record = WithFlag {
            NAME: "app".to_owned(),
            ENABLED: true,
        };
        let err = validate_record(&record).expect_err("expected error");
        match err {
            Error::FieldMustBeStringOrInt { field } => assert_eq!(field, "ENABLED"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_inconsistent_registry() {
        let record = Broken {
            name: "x".to_owned(),
        };
        let err = validate_record(&record).expect_err("expected error");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
