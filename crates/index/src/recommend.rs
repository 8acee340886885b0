use crate::index::SkillIndex;
use corpus_protocol::UnknownSlug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Product-type recommendation: the mapped slugs that exist, plus soft
/// diagnostics for the ones that do not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub slugs: Vec<String>,
    pub unknown: Vec<UnknownSlug>,
}

/// Look up the configured skill list for `product_type`.
///
/// A slug absent from the index is an `UnknownSlug` diagnostic, not a
/// failure; an unmapped product type yields an empty recommendation.
#[must_use]
pub fn recommend_for_product(
    product_type: &str,
    product_skill_map: &BTreeMap<String, Vec<String>>,
    index: &SkillIndex,
) -> Recommendation {
    let Some(mapped) = product_skill_map.get(product_type) else {
        log::warn!("product type not in product-skill map: {product_type}");
        return Recommendation::default();
    };

    let mut recommendation = Recommendation::default();
    for slug in mapped {
        if index.contains(slug) {
            recommendation.slugs.push(slug.clone());
        } else {
            recommendation.unknown.push(UnknownSlug {
                slug: slug.clone(),
                referenced_by: product_type.to_string(),
            });
        }
    }
    recommendation
}
