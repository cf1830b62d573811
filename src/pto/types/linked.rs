use serde::{Deserialize, Serialize};

/// A per-image parameter that is either a literal or linked to another image
///
/// Serializes as `{"value": x}` or `{"referenceId": n}`. A reference names the
/// image whose value of the same parameter is authoritative; it is not checked
/// against the image list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum LinkedValue<T> {
    Value(T),
    #[serde(rename = "referenceId")]
    Reference(usize),
}

impl<T: Copy> LinkedValue<T> {
    /// The literal, if this is not a reference
    pub fn value(&self) -> Option<T> {
        match self {
            LinkedValue::Value(v) => Some(*v),
            LinkedValue::Reference(_) => None,
        }
    }

    /// The referenced image, if any
    pub fn reference_id(&self) -> Option<usize> {
        match self {
            LinkedValue::Value(_) => None,
            LinkedValue::Reference(id) => Some(*id),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, LinkedValue::Reference(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let value = LinkedValue::Value(1.5);
        assert_eq!(value.value(), Some(1.5));
        assert_eq!(value.reference_id(), None);

        let linked: LinkedValue<f64> = LinkedValue::Reference(3);
        assert!(linked.is_reference());
        assert_eq!(linked.value(), None);
        assert_eq!(linked.reference_id(), Some(3));
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_string(&LinkedValue::Value(0.5)).unwrap();
        assert_eq!(value, r#"{"value":0.5}"#);
        let linked = serde_json::to_string(&LinkedValue::<f64>::Reference(0)).unwrap();
        assert_eq!(linked, r#"{"referenceId":0}"#);

        let back: LinkedValue<i32> = serde_json::from_str(r#"{"referenceId":2}"#).unwrap();
        assert_eq!(back, LinkedValue::Reference(2));
    }
}
