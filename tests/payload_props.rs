//! Property tests for the image payload encoding and prompt substitution.

use proptest::prelude::*;

use dermalens::domain::ImagePayload;
use dermalens::domain::prompt::{PromptContext, TemplateRenderer};
use dermalens::services::MinijinjaTemplateRenderer;

proptest! {
    #[test]
    fn data_uri_round_trip_preserves_bytes_and_mime(
        bytes in proptest::collection::vec(any::<u8>(), 1..512),
        mime_idx in 0usize..5,
    ) {
        let mime = ["image/png", "image/jpeg", "image/webp", "image/gif", "image/bmp"][mime_idx];
        let image = ImagePayload::new(mime, bytes.clone()).unwrap();
        let back = ImagePayload::from_data_uri(&image.to_data_uri()).unwrap();
        prop_assert_eq!(back.mime(), mime);
        prop_assert_eq!(back.bytes(), bytes.as_slice());
    }

    #[test]
    fn substituted_values_are_never_re_evaluated(
        value in ".*",
    ) {
        let renderer = MinijinjaTemplateRenderer::new();
        let context = PromptContext::new().with_var("value", value.as_str());
        let rendered = renderer.render("before {{ value }} after", &context, "prop").unwrap();
        prop_assert_eq!(rendered, format!("before {} after", value));
    }

    #[test]
    fn arbitrary_strings_never_parse_as_data_uris_unless_well_formed(
        junk in "[a-z0-9 ]{0,64}",
    ) {
        // No data: scheme, so parsing must always fail cleanly.
        prop_assert!(ImagePayload::from_data_uri(&junk).is_err());
    }
}
