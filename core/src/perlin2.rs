use crate::NoiseGenerator;

// Ken Perlin's reference permutation, used whenever the sampler is not reseeded
const REFERENCE_PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

// Amplitude falloff between octaves
const PERSISTENCE: f64 = 0.5;

// 2D Perlin noise sampler with octave summation, normalized to [0, 1]
// Sampling only reads the permutation table, so one instance can be shared
// across threads once it has been reseeded.
#[derive(Clone, Debug)]
pub struct Perlin2D {
    perm: [u8; 512], // permutation table (256 duplicated)
}

impl Perlin2D {
    // Unseeded sampler: always the reference permutation, same output every run
    pub fn new() -> Self {
        Self {
            perm: Self::double(&REFERENCE_PERM),
        }
    }

    // Seed 0 keeps the unseeded state, anything else reseeds
    pub fn seeded(seed: u64) -> Self {
        let mut sampler = Self::new();
        if seed != 0 {
            sampler.reseed(seed);
        }
        sampler
    }

    // Rebuild the permutation table from `seed`
    pub fn reseed(&mut self, seed: u64) {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        // xorshift64 must never sit on a zero state
        let mut x = seed ^ 0xDEADBEEFCAFEBABE_u64;
        if x == 0 {
            x = 0x9E3779B97F4A7C15;
        }
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        // Fisher–Yates shuffle p[0..256]
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        self.perm = Self::double(&p);
        tracing::trace!(seed, "reseeded noise sampler");
    }

    // Duplicate into 512 entries so corner lookups never wrap
    fn double(p: &[u8; 256]) -> [u8; 512] {
        std::array::from_fn(|i| p[i & 255])
    }

    // Fade function as defined by Ken Perlin: 6t^5 − 15t^4 + 10t^3
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        a + t * (b - a)
    }

    // Pick one of the diagonal/axis gradients from the low 4 bits and dot it with (x, y)
    #[inline]
    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        let h = hash & 0xF;
        let u = if h < 8 { x } else { y };
        let v = if h < 8 { y } else { x };
        let sign_u = if (h & 1) == 0 { u } else { -u };
        let sign_v = if (h & 2) == 0 { v } else { -v };
        sign_u + sign_v
    }

    // Raw single-octave noise, roughly in [-1, 1], zero on lattice points
    fn noise(&self, x: f64, y: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let tx = x - xf;
        let ty = y - yf;
        let u = Self::fade(tx);
        let v = Self::fade(ty);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let b = p[xi + 1] as usize + yi;
        let aa = p[a];
        let ab = p[a + 1];
        let ba = p[b];
        let bb = p[b + 1];

        let x1 = Self::lerp(Self::grad(aa, tx, ty), Self::grad(ba, tx - 1.0, ty), u);
        let x2 = Self::lerp(
            Self::grad(ab, tx, ty - 1.0),
            Self::grad(bb, tx - 1.0, ty - 1.0),
            u,
        );
        Self::lerp(x1, x2, v)
    }

    // Fractal sum of `octaves` layers, each at double the frequency and half
    // the amplitude of the last. Always lands in [0, 1]; zero octaves gives 0.5.
    pub fn sample(&self, x: f64, z: f64, octaves: u32) -> f64 {
        let mut amplitude = 1.0;
        let mut freq = 1.0;
        let mut total = 0.0;
        let mut max_amp = 0.0;

        for _ in 0..octaves {
            total += self.noise(x * freq, z * freq) * amplitude;
            max_amp += amplitude;
            amplitude *= PERSISTENCE;
            freq *= 2.0;
        }

        if max_amp == 0.0 {
            return 0.5;
        }
        ((total / max_amp + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl Default for Perlin2D {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseGenerator for Perlin2D {
    fn sample(&self, x: f64, z: f64, octaves: u32) -> f64 {
        Perlin2D::sample(self, x, z, octaves)
    }
}
