use super::config::NodeSize;
use itertools::Itertools;

/// Horizontal anchor of every node, indexed by node.
///
/// Rank 0 is packed and centred on `x = 0`. Every following rank starts from
/// the mean x of each node's parents, then a left-to-right pass enforces the
/// minimum gap and the whole rank is shifted back so its average displacement
/// from the wanted positions is zero. Order inside a rank is never changed.
pub(super) fn assign_x(
    layers: &[Vec<usize>],
    sizes: &[NodeSize],
    parents: &[Vec<usize>],
    gap: f64,
) -> Vec<f64> {
    let mut x = vec![0.0; sizes.len()];

    for (rank, layer) in layers.iter().enumerate() {
        let packed = pack(layer, sizes, gap);
        let wanted: Vec<f64> = if rank == 0 {
            packed
        } else {
            layer
                .iter()
                .zip(packed)
                .map(|(&node, packed_x)| {
                    if parents[node].is_empty() {
                        packed_x
                    } else {
                        parents[node].iter().map(|&p| x[p]).sum::<f64>() / parents[node].len() as f64
                    }
                })
                .collect()
        };

        let mut placed = wanted.clone();
        for (i, j) in (0..layer.len()).tuple_windows() {
            let min_distance = (sizes[layer[i]].width + sizes[layer[j]].width) / 2.0 + gap;
            if placed[j] < placed[i] + min_distance {
                placed[j] = placed[i] + min_distance;
            }
        }

        if !layer.is_empty() {
            let drift = wanted
                .iter()
                .zip(&placed)
                .map(|(w, p)| w - p)
                .sum::<f64>()
                / layer.len() as f64;
            for (&node, p) in layer.iter().zip(placed) {
                x[node] = p + drift;
            }
        }
    }

    x
}

/// Centres of the nodes of one rank packed side by side around `x = 0`.
fn pack(layer: &[usize], sizes: &[NodeSize], gap: f64) -> Vec<f64> {
    let total = layer.iter().map(|&n| sizes[n].width).sum::<f64>()
        + gap * layer.len().saturating_sub(1) as f64;
    let mut cursor = -total / 2.0;
    layer
        .iter()
        .map(|&node| {
            let center = cursor + sizes[node].width / 2.0;
            cursor += sizes[node].width + gap;
            center
        })
        .collect()
}
