use shared::Measurement;

/// Completed point-to-point measurements, in creation order
#[derive(Default, Debug)]
pub struct MeasurementState {
    items: Vec<Measurement>,
}

impl MeasurementState {
    pub fn add(&mut self, measurement: Measurement) {
        self.items.push(measurement);
    }

    /// Remove every measurement
    pub fn clear_all(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[Measurement] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_distance(&self) -> f64 {
        self.items.iter().map(|m| m.distance).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_preserves_order() {
        let mut s = MeasurementState::default();
        s.add(Measurement::new([0.0; 3], [1.0, 0.0, 0.0]));
        s.add(Measurement::new([0.0; 3], [0.0, 2.0, 0.0]));
        assert_eq!(s.len(), 2);
        assert_eq!(s.items()[0].distance, 1.0);
        assert_eq!(s.items()[1].distance, 2.0);
        assert_eq!(s.total_distance(), 3.0);
    }

    #[test]
    fn test_clear_all() {
        let mut s = MeasurementState::default();
        for i in 0..7 {
            s.add(Measurement::new([0.0; 3], [i as f64, 0.0, 0.0]));
        }
        s.clear_all();
        assert!(s.is_empty());
        s.clear_all();
        assert!(s.is_empty());
    }
}
