//! Methods for mesh-transfer operators.
use crate::types::operator::TransferOperator;

impl TransferOperator {
    /// Create an operator with no rows.
    pub fn new() -> TransferOperator {
        TransferOperator {
            ptr: vec![0],
            conn: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.ptr.len().saturating_sub(1)
    }

    /// Borrow the node numbers and weights of one row.
    pub fn row(&self, row: usize) -> (&[i32], &[f64]) {
        let (lo, hi) = (self.ptr[row], self.ptr[row + 1]);
        (&self.conn[lo..hi], &self.weights[lo..hi])
    }

    /// True if the operator carries no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }
}

impl Default for TransferOperator {
    fn default() -> Self {
        TransferOperator::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rows() {
        let op = TransferOperator {
            ptr: vec![0, 1, 3],
            conn: vec![2, 0, 1],
            weights: vec![1.0, 0.5, 0.5],
        };

        assert_eq!(op.num_rows(), 2);
        assert_eq!(op.row(0), (&[2][..], &[1.0][..]));
        assert_eq!(op.row(1), (&[0, 1][..], &[0.5, 0.5][..]));
        assert!(TransferOperator::new().is_empty());
    }
}
