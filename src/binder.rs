use crate::error::Error;
use crate::record::{FieldSlot, Record};

/// Outcome of binding a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Binding {
    Bound,
    /// No field carries this name.
    Unknown,
    /// The field exists but its kind cannot be assigned; left for the
    /// completeness pass to reject.
    Unsupported,
}

/// Coerce `value` into the field named `key` and assign it in place.
pub(crate) fn bind_field<R>(record: &mut R, key: &str, value: &str) -> Result<Binding, Error>
where
    R: Record + ?Sized,
{
    let Some(field) = record.field_mut(key) else {
        return Ok(Binding::Unknown);
    };

    match field.slot() {
        FieldSlot::Integer(slot) => {
            slot.set_decimal(value)
                .map_err(|_| Error::FieldMustBeInteger {
                    field: key.to_owned(),
                })?;
        }
        FieldSlot::Text(slot) => {
            if value.is_empty() {
                return Err(Error::FieldMustNotBeBlank {
                    field: key.to_owned(),
                });
            }
            *slot = value.to_owned();
        }
        FieldSlot::Unsupported => return Ok(Binding::Unsupported),
    }

    tracing::trace!(field = key, "bound field");
    Ok(Binding::Bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        #[allow(non_snake_case)]
        #[derive(Debug, Default)]
        struct Settings {
            NAME: String,
            PORT: i64,
            LEVEL: u8,
            DEBUG: bool,
        }
    }

    #[test]
    fn binds_text_verbatim() {
        let mut settings = Settings::default();
        let binding = bind_field(&mut settings, "NAME", "value1").expect("bind should succeed");

        assert_eq!(binding, Binding::Bound);
        assert_eq!(settings.NAME, "value1");
        assert_eq!(settings.PORT, 0);
    }

    #[test]
    fn binds_signed_decimal_integers() {
        let mut settings = Settings::default();
        bind_field(&mut settings, "PORT", "8080").expect("bind should succeed");
        assert_eq!(settings.PORT, 8080);

        bind_field(&mut settings, "PORT", "-42").expect("bind should succeed");
        assert_eq!(settings.PORT, -42);
    }

    #[test]
    fn rejects_non_integer_values() {
        let mut settings = Settings::default();
        for value in ["abc", "0x10", "1.5", ""] {
            let err = bind_field(&mut settings, "PORT", value).expect_err("expected error");
            match err {
                Error::FieldMustBeInteger { field } => assert_eq!(field, "PORT"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_integers_out_of_range_for_field_type() {
        let mut settings = Settings::default();
        let err = bind_field(&mut settings, "LEVEL", "300").expect_err("expected error");
        assert!(matches!(err, Error::FieldMustBeInteger { .. }));
    }

    #[test]
    fn rejects_blank_text() {
        let mut settings = Settings::default();
        let err = bind_field(&mut settings, "NAME", "").expect_err("expected error");
        match err {
            Error::FieldMustNotBeBlank { field } => assert_eq!(field, "NAME"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_and_unsupported_fields_are_left_alone() {
        let mut settings = Settings::default();

        assert_eq!(
            bind_field(&mut settings, "MISSING", "1").expect("bind should succeed"),
            Binding::Unknown
        );
        assert_eq!(
            bind_field(&mut settings, "name", "x").expect("bind should succeed"),
            Binding::Unknown
        );
        assert_eq!(
            bind_field(&mut settings, "DEBUG", "true").expect("bind should succeed"),
            Binding::Unsupported
        );
        assert!(!settings.DEBUG);
        assert!(settings.NAME.is_empty());
    }
}
