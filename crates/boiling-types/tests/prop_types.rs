// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Property-Based Tests (proptest) for boiling-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for boiling-types using proptest.
//!
//! Covers: Grid construction invariants, element tiling, point location.

use boiling_types::state::{Grid, Point, Side};
use proptest::prelude::*;

proptest! {
    /// Node and element counts follow from the resolution.
    #[test]
    fn grid_counts_match(
        ner in 1usize..40,
        nez in 1usize..40,
    ) {
        let grid = Grid::uniform(ner, nez, 0.0, 2.0, -1.0, 1.0).unwrap();

        prop_assert_eq!(grid.nodes_count(), (ner + 1) * (nez + 1));
        prop_assert_eq!(grid.elements.len(), ner * nez);
        prop_assert_eq!(grid.elements_along_r(), ner);
        prop_assert_eq!(grid.elements_along_z(), nez);
        prop_assert_eq!(grid.boundary_elements(Side::Bottom).len(), ner);
        prop_assert_eq!(grid.boundary_elements(Side::Right).len(), nez);
    }

    /// Element areas tile the domain exactly.
    #[test]
    fn elements_tile_domain(
        ner in 1usize..30,
        nez in 1usize..30,
        r_min in 0.0f64..5.0,
        z_min in -5.0f64..5.0,
    ) {
        let r_max = r_min + 3.0;
        let z_max = z_min + 2.0;
        let grid = Grid::uniform(ner, nez, r_min, r_max, z_min, z_max).unwrap();

        let area: f64 = grid.elements.iter().map(|e| e.width * e.length).sum();
        prop_assert!((area - 6.0).abs() < 1e-9, "area = {}", area);

        for e in &grid.elements {
            prop_assert!(e.width > 0.0 && e.length > 0.0);
        }
    }

    /// The located element's box always contains the query point.
    #[test]
    fn locate_returns_containing_element(
        ner in 1usize..25,
        nez in 1usize..25,
        fr in 0.0f64..=1.0,
        fz in 0.0f64..=1.0,
    ) {
        let grid = Grid::uniform(ner, nez, 0.5, 2.5, 0.0, 4.0).unwrap();
        let p = Point::new(0.5 + 2.0 * fr, 4.0 * fz);

        let idx = grid.locate(p);
        prop_assert!(idx.is_some());
        let e = &grid.elements[idx.unwrap()];
        let bl = grid.nodes[e.node_indexes[0]];
        let tr = grid.nodes[e.node_indexes[3]];
        prop_assert!(bl.r <= p.r && p.r <= tr.r);
        prop_assert!(bl.z <= p.z && p.z <= tr.z);
    }
}
