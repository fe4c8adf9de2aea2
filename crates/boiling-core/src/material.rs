// ─────────────────────────────────────────────────────────────────────
// Boiling Core — Material
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Material lookup by id.

use boiling_types::error::{BoilingError, BoilingResult};
use boiling_types::state::Material;

/// Source of immutable material properties for one solve.
pub trait MaterialProvider {
    fn get_by_id(&self, id: usize) -> BoilingResult<&Material>;
}

/// Materials indexed by position.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: Vec<Material>,
}

impl MaterialTable {
    pub fn new(materials: Vec<Material>) -> Self {
        MaterialTable { materials }
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialProvider for MaterialTable {
    fn get_by_id(&self, id: usize) -> BoilingResult<&Material> {
        self.materials
            .get(id)
            .ok_or(BoilingError::UnknownMaterial { id })
    }
}
