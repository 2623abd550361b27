use ndarray::Array1;

/// One parsed input table: parallel frequency and power columns.
///
/// Rows are assumed sorted ascending by frequency; columns beyond the first
/// two were dropped at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Periodogram {
    pub frequencies: Array1<f64>,
    pub powers: Array1<f64>,
}

impl Periodogram {
    pub fn new(frequencies: Array1<f64>, powers: Array1<f64>) -> Self {
        Self {
            frequencies,
            powers,
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn length_tracks_the_frequency_column() {
        let pg = Periodogram::new(array![1.0, 2.0, 3.0], array![0.5, 0.2, 0.1]);
        assert_eq!(pg.len(), 3);
        assert!(!pg.is_empty());
    }
}
