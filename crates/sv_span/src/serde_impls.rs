use serde_core::{Serialize, Serializer};

use crate::{RawSpan, Span, SpanMut};

impl<T: Serialize> Serialize for Span<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<T: Serialize> Serialize for SpanMut<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_span().serialize(serializer)
    }
}

impl Serialize for RawSpan<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bytes(self.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use crate::{RawSpan, Span, SpanMut};

    #[test]
    fn sequences() {
        let values = [3, 1, 4, 1, 5];
        let span = Span::new(&values);

        assert_eq!(serde_json::to_string(&span).unwrap(), "[3,1,4,1,5]");
        assert_eq!(serde_json::to_string(&span.drop_first(3)).unwrap(), "[1,5]");

        let mut values = [0.5f32, 1.5];
        let span = SpanMut::new(&mut values);
        assert_eq!(serde_json::to_string(&span).unwrap(), "[0.5,1.5]");
    }

    #[test]
    fn bytes() {
        let raw = RawSpan::new(&[1, 2, 255]);
        assert_eq!(serde_json::to_string(&raw).unwrap(), "[1,2,255]");
    }
}
