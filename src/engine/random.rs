// ==========================================
// 车间物资配送排期系统 - 随机决策源
// ==========================================
// 每个随机决策由 (seed, 车间序号, 物资序号) 派生，可复现
// 未指定 seed 时从系统熵取一个 seed 并记录，方便回放
// ==========================================

use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionSource {
    seed: u64,
}

impl DecisionSource {
    /// 指定 seed（None 时随机取一个）
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed: seed.unwrap_or_else(rand::random),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 某车间某物资的独立随机流
    pub fn rng_for(&self, workshop_idx: usize, material_idx: usize) -> StdRng {
        StdRng::seed_from_u64(derive_stream_seed(self.seed, workshop_idx, material_idx))
    }
}

/// splitmix64 终混
fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn derive_stream_seed(seed: u64, workshop_idx: usize, material_idx: usize) -> u64 {
    let w = mix64(workshop_idx as u64);
    let m = mix64((material_idx as u64).wrapping_add(0x5851_F42D_4C95_7F2D));
    mix64(seed ^ w ^ m.rotate_left(17))
}
