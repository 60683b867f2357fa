//! Vector scoring primitives shared by the similarity engine

use ndarray::ArrayView1;

/// Cosine similarity of two equal-length vectors.
///
/// Returns 0.0 when either vector has zero norm or the ratio is not finite.
/// The result is clamped to [-1, 1] to absorb rounding.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let va = ArrayView1::from(a);
    let vb = ArrayView1::from(b);

    let norm_a = va.dot(&va).sqrt();
    let norm_b = vb.dot(&vb).sqrt();
    if norm_a <= 0.0 || norm_b <= 0.0 {
        return 0.0;
    }

    let sim = va.dot(&vb) / (norm_a * norm_b);
    if !sim.is_finite() {
        return 0.0;
    }
    sim.clamp(-1.0, 1.0)
}

/// Element-wise sum `a + b`. The shorter input is treated as zero-padded.
pub fn add_vectors(a: &[f32], b: &[f32]) -> Vec<f32> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| a.get(i).copied().unwrap_or(0.0) + b.get(i).copied().unwrap_or(0.0))
        .collect()
}

/// Element-wise (Hadamard) product over the common prefix
pub fn hadamard(a: &[f32], b: &[f32]) -> Vec<f32> {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).collect()
}
