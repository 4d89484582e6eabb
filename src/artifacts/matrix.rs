use crate::error::{AppError, AppResult};

/// Pre-computed pairwise content-similarity scores between all catalog rows.
///
/// Stored as a flat row-major `f32` buffer. Cell `(i, j)` scores the
/// similarity between catalog rows `i` and `j`; only row reads are needed, so
/// symmetry is never checked. The wire encoding is a little-endian `u32` side
/// length followed by `side * side` little-endian `f32` values.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    side: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Builds a matrix from explicit rows. Panics on ragged input; intended
    /// for fixtures.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Self {
        let side = rows.len();
        let mut scores = Vec::with_capacity(side * side);
        for row in rows {
            assert_eq!(row.len(), side, "similarity matrix rows must be square");
            scores.extend(row);
        }
        Self { side, scores }
    }

    /// Decodes the binary artifact, rejecting payloads that do not match the
    /// declared side length exactly.
    pub fn decode(bytes: &[u8]) -> AppResult<Self> {
        let header: [u8; 4] = bytes
            .get(..4)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                AppError::Artifact("Similarity artifact too short for header".to_string())
            })?;
        let side = u32::from_le_bytes(header) as usize;

        let expected_bytes = side
            .checked_mul(side)
            .and_then(|cells| cells.checked_mul(4))
            .ok_or_else(|| {
                AppError::Artifact(format!("Similarity artifact side {} overflows", side))
            })?;
        let payload = &bytes[4..];
        if payload.len() != expected_bytes {
            return Err(AppError::Artifact(format!(
                "Similarity artifact payload is {} bytes, expected {} for side {}",
                payload.len(),
                expected_bytes,
                side
            )));
        }

        let scores = payload
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
            .collect();

        Ok(Self { side, scores })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Row `i` of pairwise scores, aligned with catalog row order
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.side {
            return None;
        }
        Some(&self.scores[i * self.side..(i + 1) * self.side])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(rows: &[&[f32]]) -> Vec<u8> {
        let mut bytes = (rows.len() as u32).to_le_bytes().to_vec();
        for row in rows {
            for score in *row {
                bytes.extend(score.to_le_bytes());
            }
        }
        bytes
    }

    #[test]
    fn test_decode_round_trips_rows() {
        let bytes = encode(&[&[1.0, 0.5], &[0.5, 1.0]]);
        let matrix = SimilarityMatrix::decode(&bytes).unwrap();
        assert_eq!(matrix.side(), 2);
        assert_eq!(matrix.row(0), Some(&[1.0f32, 0.5][..]));
        assert_eq!(matrix.row(1), Some(&[0.5f32, 1.0][..]));
    }

    #[test]
    fn test_decode_empty_matrix() {
        let matrix = SimilarityMatrix::decode(&encode(&[])).unwrap();
        assert_eq!(matrix.side(), 0);
        assert_eq!(matrix.row(0), None);
    }

    #[test]
    fn test_decode_rejects_short_header() {
        assert!(matches!(
            SimilarityMatrix::decode(&[1, 0]),
            Err(AppError::Artifact(_))
        ));
    }

    #[test]
    fn test_decode_rejects_overflowing_side() {
        // Header alone, claiming a side whose byte size overflows usize
        let bytes = u32::MAX.to_le_bytes().to_vec();
        assert!(matches!(
            SimilarityMatrix::decode(&bytes),
            Err(AppError::Artifact(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let mut bytes = encode(&[&[1.0, 0.5], &[0.5, 1.0]]);
        bytes.pop();
        assert!(matches!(
            SimilarityMatrix::decode(&bytes),
            Err(AppError::Artifact(_))
        ));
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = encode(&[&[1.0]]);
        bytes.extend([0, 0, 0, 0]);
        assert!(matches!(
            SimilarityMatrix::decode(&bytes),
            Err(AppError::Artifact(_))
        ));
    }

    #[test]
    fn test_row_out_of_bounds() {
        let matrix = SimilarityMatrix::from_rows(vec![vec![1.0]]);
        assert_eq!(matrix.row(1), None);
    }
}
