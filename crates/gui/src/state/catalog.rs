//! Predefined parts catalog

use std::collections::HashSet;

use shared::GeometryType;

/// Spacing between parts placed by one assembly, along X
pub const ASSEMBLY_SPACING: f64 = 1.5;

/// A selectable predefined part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub geometry: GeometryType,
    /// Cosmetic size label shown in the catalog
    pub size_label: &'static str,
}

pub const PARTS: &[PartSpec] = &[
    PartSpec { id: "base-plate", name: "Base Plate", geometry: GeometryType::Box, size_label: "200 × 200 × 10 mm" },
    PartSpec { id: "support-column", name: "Support Column", geometry: GeometryType::Cylinder, size_label: "Ø40 × 300 mm" },
    PartSpec { id: "ball-joint", name: "Ball Joint", geometry: GeometryType::Sphere, size_label: "Ø50 mm" },
    PartSpec { id: "mounting-block", name: "Mounting Block", geometry: GeometryType::Box, size_label: "80 × 60 × 40 mm" },
    PartSpec { id: "pipe-segment", name: "Pipe Segment", geometry: GeometryType::Cylinder, size_label: "Ø25 × 500 mm" },
    PartSpec { id: "control-knob", name: "Control Knob", geometry: GeometryType::Sphere, size_label: "Ø30 mm" },
];

pub fn find_part(id: &str) -> Option<&'static PartSpec> {
    PARTS.iter().find(|p| p.id == id)
}

/// Multi-select set of catalog parts
#[derive(Default, Debug)]
pub struct CatalogState {
    selected: HashSet<&'static str>,
}

impl CatalogState {
    /// Toggle a part in or out of the selection. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) {
        let Some(part) = find_part(id) else {
            return;
        };
        if !self.selected.remove(part.id) {
            self.selected.insert(part.id);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Selected parts in catalog order
    pub fn selected_parts(&self) -> Vec<&'static PartSpec> {
        PARTS.iter().filter(|p| self.selected.contains(p.id)).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut c = CatalogState::default();
        c.toggle("ball-joint");
        assert!(c.is_selected("ball-joint"));
        c.toggle("ball-joint");
        assert!(!c.is_selected("ball-joint"));
    }

    #[test]
    fn test_unknown_id_ignored() {
        let mut c = CatalogState::default();
        c.toggle("flux-capacitor");
        assert_eq!(c.selected_count(), 0);
    }

    #[test]
    fn test_selected_parts_in_catalog_order() {
        let mut c = CatalogState::default();
        c.toggle("control-knob");
        c.toggle("base-plate");
        c.toggle("pipe-segment");
        let ids: Vec<_> = c.selected_parts().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["base-plate", "pipe-segment", "control-knob"]);
    }

    #[test]
    fn test_part_ids_unique() {
        let ids: HashSet<_> = PARTS.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), PARTS.len());
    }
}
