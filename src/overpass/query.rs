use crate::models::{BoundingBox, PoiCategory};

/// Overpass QL query selecting nodes of each category inside `bbox`
pub fn build_query(bbox: &BoundingBox, categories: &[PoiCategory], timeout_secs: u64) -> String {
    let bbox_str = bbox.to_overpass();

    // Only nodes: water taps and fountains are mapped as points in practice
    let parts: String = categories
        .iter()
        .map(|c| format!("node{}{};", c.tag_filter(), bbox_str))
        .collect();

    format!(
        "[out:json][timeout:{}];({});out center;",
        timeout_secs, parts
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category() {
        let bbox = BoundingBox::new(45.0, 5.5, 45.5, 6.0);
        assert_eq!(
            build_query(&bbox, &[PoiCategory::Water], 25),
            "[out:json][timeout:25];(node[amenity=drinking_water](45,5.5,45.5,6););out center;"
        );
    }

    #[test]
    fn test_one_clause_per_category_in_order() {
        let bbox = BoundingBox::new(-1.5, 10.0, 2.25, 11.0);
        let query = build_query(&bbox, &[PoiCategory::Tap, PoiCategory::Spring], 60);

        assert!(query.starts_with("[out:json][timeout:60];("));
        assert!(query.ends_with(");out center;"));
        assert_eq!(query.matches("node[").count(), 2);

        let tap = query
            .find("node[man_made=water_tap][drinking_water=yes](-1.5,10,2.25,11);")
            .unwrap();
        let spring = query
            .find("node[natural=spring][drinking_water=yes](-1.5,10,2.25,11);")
            .unwrap();
        assert!(tap < spring);
    }
}
