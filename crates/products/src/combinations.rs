//! Variant combination generator.
//!
//! Expands variant definitions into SKU rows: the cartesian product of every
//! variant's properties, first variant varying slowest.

use crate::draft::{Variant, VariantCombination};

/// Generate every SKU row for `variants`.
///
/// - The result length is the product of all property counts.
/// - A variant with no properties yields no rows at all.
/// - No variants yields no rows.
///
/// Each row starts from the default per-row fields.
pub fn generate_combinations(variants: &[Variant]) -> Vec<VariantCombination> {
    if variants.is_empty() {
        return Vec::new();
    }

    let mut partial: Vec<Vec<(&str, &str)>> = vec![Vec::new()];
    for variant in variants {
        partial = partial
            .iter()
            .flat_map(|prefix| {
                variant.properties.iter().map(move |property| {
                    let mut next = prefix.clone();
                    next.push((variant.name.as_str(), property.as_str()));
                    next
                })
            })
            .collect();

        if partial.is_empty() {
            break;
        }
    }

    partial
        .into_iter()
        .map(VariantCombination::from_values)
        .collect()
}

/// Number of rows [`generate_combinations`] would produce, without building them.
pub fn combination_count(variants: &[Variant]) -> usize {
    if variants.is_empty() {
        return 0;
    }
    variants
        .iter()
        .map(|v| v.properties.len())
        .fold(1usize, usize::saturating_mul)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn size_and_color() -> Vec<Variant> {
        vec![
            Variant::with_properties("Size", ["S", "M"]),
            Variant::with_properties("Color", ["Red", "Blue"]),
        ]
    }

    fn pairs(rows: &[VariantCombination], a: &str, b: &str) -> Vec<(String, String)> {
        rows.iter()
            .map(|r| {
                (
                    r.value(a).unwrap_or_default().to_string(),
                    r.value(b).unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn size_by_color_enumerates_first_variant_slowest() {
        let rows = generate_combinations(&size_and_color());
        assert_eq!(rows.len(), 4);
        assert_eq!(
            pairs(&rows, "Size", "Color"),
            vec![
                ("S".to_string(), "Red".to_string()),
                ("S".to_string(), "Blue".to_string()),
                ("M".to_string(), "Red".to_string()),
                ("M".to_string(), "Blue".to_string()),
            ]
        );
        for row in &rows {
            assert_eq!(row.quantity, "1");
            assert!(!row.cover);
            assert_eq!(row.packing_length, "0");
            assert_eq!(row.packing_width, "0");
            assert_eq!(row.packing_height, "0");
            assert_eq!(row.price, "");
            assert_eq!(row.weight, "");
            assert_eq!(row.external_id, "");
        }
    }

    #[test]
    fn no_variants_yields_no_rows() {
        assert!(generate_combinations(&[]).is_empty());
        assert_eq!(combination_count(&[]), 0);
    }

    #[test]
    fn empty_property_list_collapses_everything() {
        let mut variants = size_and_color();
        variants.insert(1, Variant::with_properties("Material", Vec::<String>::new()));
        assert!(generate_combinations(&variants).is_empty());
        assert_eq!(combination_count(&variants), 0);
    }

    #[test]
    fn single_variant_keeps_property_order() {
        let rows = generate_combinations(&[Variant::with_properties("Size", ["L", "S", "M"])]);
        let sizes: Vec<_> = rows.iter().map(|r| r.value("Size").unwrap()).collect();
        assert_eq!(sizes, vec!["L", "S", "M"]);
    }

    #[test]
    fn rows_carry_values_in_declaration_order() {
        let rows = generate_combinations(&size_and_color());
        let names: Vec<_> = rows[0].values().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Size", "Color"]);
    }

    #[test]
    fn duplicate_variant_names_multiply_but_share_a_slot() {
        let rows = generate_combinations(&[
            Variant::with_properties("Size", ["S", "M"]),
            Variant::with_properties("Size", ["X", "Y"]),
        ]);
        assert_eq!(rows.len(), 4);
        let sizes: Vec<_> = rows.iter().map(|r| r.value("Size").unwrap()).collect();
        assert_eq!(sizes, vec!["X", "Y", "X", "Y"]);
        assert!(rows.iter().all(|r| r.values().count() == 1));
    }

    #[test]
    fn variant_named_like_a_row_field_keeps_its_value() {
        let rows = generate_combinations(&[Variant::with_properties("price", ["10", "20"])]);
        assert_eq!(rows[1].value("price"), Some("20"));
        assert_eq!(rows[1].price, "");
        assert_eq!(rows[1].quantity, "1");
    }

    fn variants_strategy() -> impl Strategy<Value = Vec<Variant>> {
        proptest::collection::vec(
            ("[A-Z][a-z]{0,6}", proptest::collection::vec("[a-z0-9]{1,4}", 0..4)),
            0..4,
        )
        .prop_map(|vs| {
            vs.into_iter()
                .enumerate()
                // Unique names so every axis keeps its own slot.
                .map(|(i, (name, props))| Variant::with_properties(format!("{name}{i}"), props))
                .collect()
        })
    }

    proptest! {
        /// Property: output length is the product of property counts
        /// (zero when there are no variants).
        #[test]
        fn length_is_product_of_property_counts(variants in variants_strategy()) {
            let rows = generate_combinations(&variants);
            let expected = if variants.is_empty() {
                0
            } else {
                variants.iter().map(|v| v.properties.len()).product::<usize>()
            };
            prop_assert_eq!(rows.len(), expected);
            prop_assert_eq!(combination_count(&variants), expected);
        }

        /// Property: the last variant varies fastest.
        #[test]
        fn last_variant_varies_fastest(variants in variants_strategy()) {
            let rows = generate_combinations(&variants);
            if let Some(last) = variants.last() {
                let n = last.properties.len();
                for (i, row) in rows.iter().enumerate() {
                    prop_assert_eq!(row.value(&last.name), Some(last.properties[i % n].as_str()));
                }
            }
        }

        /// Property: generation is deterministic.
        #[test]
        fn generation_is_deterministic(variants in variants_strategy()) {
            prop_assert_eq!(generate_combinations(&variants), generate_combinations(&variants));
        }
    }
}
