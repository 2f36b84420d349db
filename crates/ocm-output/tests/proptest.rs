//! Property based tests for cell fitting and width learning.

use ocm_output::{fit, text_width, TableBuilder, Value};
use proptest::prelude::*;

proptest! {
    #[test]
    fn fit_is_exactly_width(text in "\\PC{0,40}", width in 0usize..60) {
        prop_assert_eq!(text_width(&fit(&text, width)), width);
    }

    #[test]
    fn fit_truncates_to_prefix(text in "[a-z0-9-]{1,40}", width in 0usize..40) {
        prop_assume!(text.len() > width);
        prop_assert_eq!(fit(&text, width), &text[..width]);
    }

    #[test]
    fn fit_pads_with_spaces(text in "[a-z0-9-]{0,20}", extra in 0usize..20) {
        let fitted = fit(&text, text.len() + extra);
        prop_assert!(fitted.starts_with(text.as_str()));
        prop_assert_eq!(fitted[text.len()..].to_string(), " ".repeat(extra));
    }

    #[test]
    fn learned_widths_never_shrink(rows in prop::collection::vec(("[a-z]{0,30}", "[a-z]{0,30}"), 1..30)) {
        let mut out = Vec::new();
        let mut table = TableBuilder::new()
            .writer(&mut out)
            .name("repos")
            .columns("id,name")
            .learning_limit(rows.len() + 1)
            .build()
            .unwrap();

        let mut previous = table.widths();
        for (id, name) in &rows {
            table.write_row(&[Value::from(id), Value::from(name)]).unwrap();
            let widths = table.widths();
            for (now, before) in widths.iter().zip(&previous) {
                prop_assert!(now >= before);
            }
            prop_assert!(widths[0] >= id.len());
            prop_assert!(widths[1] >= name.len());
            previous = widths;
        }
    }

    #[test]
    fn frozen_widths_cut_later_rows(
        learned in prop::collection::vec("[a-z]{1,10}", 1..10),
        late in "[a-z]{11,40}",
    ) {
        let mut out = Vec::new();
        {
            let mut table = TableBuilder::new()
                .writer(&mut out)
                .name("repos")
                .columns("name")
                .learning_limit(learned.len())
                .build()
                .unwrap();
            for name in &learned {
                table.write_row(&[Value::from(name)]).unwrap();
            }
            prop_assert!(!table.is_learning());
            let frozen = table.widths();
            table.write_row(&[Value::from(&late)]).unwrap();
            prop_assert_eq!(table.widths(), frozen);
        }

        let text = String::from_utf8(out).unwrap();
        let last = text.lines().last().unwrap();
        prop_assert!(last.len() <= 10);
        prop_assert!(late.starts_with(last));
    }
}
