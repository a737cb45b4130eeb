//! Mesh-transfer operators.

/// An interpolation or restriction operator in 0-based compressed-row form:
/// row `i` spans `conn[ptr[i]..ptr[i + 1]]` and the matching `weights` range.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferOperator {
    /// Row offsets into `conn` and `weights`; one more entry than rows.
    pub ptr: Vec<usize>,
    /// Independent node numbers, sorted within each row.
    pub conn: Vec<i32>,
    /// Weight attached to each entry of `conn`.
    pub weights: Vec<f64>,
}
