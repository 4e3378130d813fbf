//! 64-round compression function (FIPS 180-4 Section 6.2.2, steps 2-4).

use sha_trace_core::constants::ROUND_CONSTANTS;

use crate::trace::RoundStep;

/// Run the 64 compression rounds over one message schedule and fold the
/// working variables back into the state. The fold is the only state
/// mutation. When `rounds` is present, each round's temporaries and
/// working variables are recorded; the arithmetic is identical either way.
pub fn compress(state: &mut [u32; 8], w: &[u32; 64], mut rounds: Option<&mut Vec<RoundStep>>) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for t in 0..64 {
        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(ROUND_CONSTANTS[t])
            .wrapping_add(w[t]);
        let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);

        if let Some(rounds) = rounds.as_mut() {
            rounds.push(RoundStep {
                t1,
                t2,
                vars: [a, b, c, d, e, f, g, h],
            });
        }
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
    state[5] = state[5].wrapping_add(f);
    state[6] = state[6].wrapping_add(g);
    state[7] = state[7].wrapping_add(h);
}

/// Ch - e chooses between f and g bit by bit.
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

/// Maj - the most common bit across three words.
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

/// Σ0 - rotates right 2, 13 and 22.
fn big_sigma0(w: u32) -> u32 {
    w.rotate_right(2) ^ w.rotate_right(13) ^ w.rotate_right(22)
}

/// Σ1 - rotates right 6, 11 and 25.
fn big_sigma1(w: u32) -> u32 {
    w.rotate_right(6) ^ w.rotate_right(11) ^ w.rotate_right(25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::{pad, Padded};
    use crate::schedule;
    use sha_trace_core::constants::INITIAL_HASH;

    #[test]
    fn test_abc_block_compression() {
        // One full pass over the padded "abc" block must land on the
        // FIPS 180-4 intermediate hash, which for a one-block message is
        // the digest itself.
        let Padded::Single(block) = pad(b"abc", 24) else {
            panic!("abc pads to a single block");
        };
        let w = schedule::expand(&block);

        let mut state = INITIAL_HASH;
        compress(&mut state, &w, None);

        assert_eq!(
            state,
            [
                0xba7816bf, 0x8f01cfea, 0x414140de, 0x5dae2223,
                0xb00361a3, 0x96177a9c, 0xb410ff61, 0xf20015ad,
            ]
        );
    }

    #[test]
    fn test_trace_matches_untraced_run() {
        let Padded::Single(block) = pad(b"abc", 24) else {
            panic!("abc pads to a single block");
        };
        let w = schedule::expand(&block);

        let mut plain = INITIAL_HASH;
        compress(&mut plain, &w, None);

        let mut traced = INITIAL_HASH;
        let mut rounds = Vec::new();
        compress(&mut traced, &w, Some(&mut rounds));

        assert_eq!(plain, traced);
        assert_eq!(rounds.len(), 64);

        // The fold adds the last round's working variables to the entry state.
        let last = rounds[63].vars;
        for i in 0..8 {
            assert_eq!(traced[i], INITIAL_HASH[i].wrapping_add(last[i]));
        }
    }

    #[test]
    fn test_mixing_functions() {
        // Ch: x selects y where x has 1-bits, z elsewhere.
        assert_eq!(ch(0xffffffff, 0x12345678, 0x9abcdef0), 0x12345678);
        assert_eq!(ch(0x00000000, 0x12345678, 0x9abcdef0), 0x9abcdef0);
        assert_eq!(ch(0xf0f0f0f0, 0xffffffff, 0x00000000), 0xf0f0f0f0);

        // Maj: majority vote per bit.
        assert_eq!(maj(0xffffffff, 0xffffffff, 0x00000000), 0xffffffff);
        assert_eq!(maj(0xffffffff, 0x00000000, 0x00000000), 0x00000000);
        assert_eq!(maj(0xff00ff00, 0xf0f0f0f0, 0x0f0f0f0f), 0xff00ff00);
    }

    #[test]
    fn test_big_sigma_on_unit_bit() {
        assert_eq!(big_sigma0(1), (1u32 << 30) ^ (1u32 << 19) ^ (1u32 << 10));
        assert_eq!(big_sigma1(1), (1u32 << 26) ^ (1u32 << 21) ^ (1u32 << 7));
    }
}
