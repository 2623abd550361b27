use ndarray::Array1;

/// Final stacked output: the shared grid plus both combined curves.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedPeriodogram {
    pub frequencies: Array1<f64>,
    pub and_curve: Array1<f64>,
    pub or_curve: Array1<f64>,
}

/// One grid point of the stacked output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackedRow {
    pub frequency: f64,
    pub and_power: f64,
    pub or_power: f64,
}

impl StackedPeriodogram {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = StackedRow> + '_ {
        (0..self.len()).map(move |i| StackedRow {
            frequency: self.frequencies[i],
            and_power: self.and_curve[i],
            or_power: self.or_curve[i],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rows_walk_the_grid_in_order() {
        let stacked = StackedPeriodogram {
            frequencies: array![1.0, 2.0],
            and_curve: array![0.25, 0.75],
            or_curve: array![0.5, 0.5],
        };
        let rows: Vec<StackedRow> = stacked.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frequency, 1.0);
        assert_eq!(rows[0].and_power, 0.25);
        assert_eq!(rows[1].or_power, 0.5);
    }
}
