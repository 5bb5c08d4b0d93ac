use crate::{
    decode_control, decode_status, read_register, write_register, ConfigError, RegisterWidth,
};
use proptest::prelude::*;

const SPACE_SIZE: usize = pci_regs::CONFIG_SPACE_SIZE;

fn width_strategy() -> impl Strategy<Value = RegisterWidth> {
    prop::sample::select(RegisterWidth::ALL.to_vec())
}

fn access_strategy() -> impl Strategy<Value = (usize, RegisterWidth)> {
    width_strategy().prop_flat_map(|width| (0..=SPACE_SIZE - width.bytes(), Just(width)))
}

fn invalid_width_strategy() -> impl Strategy<Value = u32> {
    any::<u32>().prop_filter("valid register width", |w| RegisterWidth::from_bits(*w).is_err())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        rng_algorithm: proptest::test_runner::RngAlgorithm::ChaCha,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0x0C_F8_0CFC),
        .. ProptestConfig::default()
    })]

    #[test]
    fn control_tokens_follow_bits(value in any::<u16>()) {
        let text = decode_control(value);
        let tokens: Vec<&str> = text.split(' ').collect();
        prop_assert_eq!(tokens.len(), 11);
        for (bit, token) in tokens.iter().enumerate() {
            let set = value & (1 << bit) != 0;
            prop_assert_eq!(token.ends_with('+'), set, "bit {} in {:?}", bit, text);
        }
    }

    #[test]
    fn status_has_single_devsel_token(value in any::<u16>()) {
        let text = decode_status(value);
        let tokens: Vec<&str> = text.split(' ').collect();
        prop_assert_eq!(tokens.len(), 11);

        let devsel: Vec<&&str> = tokens.iter().filter(|t| t.starts_with("DEVSEL=")).collect();
        prop_assert_eq!(devsel.len(), 1);
        let expected = ["fast", "medium", "slow", "reserved"][usize::from((value & 0x600) >> 9)];
        prop_assert_eq!(devsel[0].trim_start_matches("DEVSEL="), expected);

        // Flag tokens map back to bits 2..=8 and 11..=13.
        let flag_bits = [2, 3, 4, 5, 6, 7, 8, 11, 12, 13];
        let flags = tokens.iter().filter(|t| !t.starts_with("DEVSEL="));
        for (bit, token) in flag_bits.iter().zip(flags) {
            prop_assert_eq!(token.ends_with('+'), value & (1 << bit) != 0);
        }
    }

    #[test]
    fn write_then_read_returns_truncated_value(
        (offset, width) in access_strategy(),
        value in any::<u64>(),
        fill in any::<u8>(),
    ) {
        let mut space = vec![fill; SPACE_SIZE];
        write_register(&mut space, offset, width.bits(), value).unwrap();
        prop_assert_eq!(read_register(&space, offset, width.bits()).unwrap(), value & width.mask());

        // Bytes outside the register are untouched.
        let end = offset + width.bytes();
        prop_assert!(space[..offset].iter().chain(&space[end..]).all(|&b| b == fill));
    }

    #[test]
    fn invalid_width_leaves_buffer_unchanged(
        width in invalid_width_strategy(),
        offset in 0..SPACE_SIZE,
        value in any::<u64>(),
        bytes in prop::collection::vec(any::<u8>(), SPACE_SIZE),
    ) {
        let mut space = bytes.clone();
        let err = write_register(&mut space, offset, width, value).unwrap_err();
        prop_assert!(
            matches!(err, ConfigError::InvalidWidth { width: w } if w == width),
            "unexpected error: {:?}",
            err
        );
        prop_assert_eq!(&space, &bytes);

        let err = read_register(&space, offset, width).unwrap_err();
        prop_assert!(
            matches!(err, ConfigError::InvalidWidth { .. }),
            "unexpected error: {:?}",
            err
        );
    }
}
