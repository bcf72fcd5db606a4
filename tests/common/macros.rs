/// Asserts that generation `$t` of the grid contains no active cell.
#[macro_export]
macro_rules! assert_generation_dead {
    ($grid:expr, $t:expr) => {
        let row = $grid.row($t).expect("generation out of range");
        assert_eq!(
            row.count_ones(),
            0,
            "Generation {} should be all zeros but was {}",
            $t,
            row
        );
    };
}

/// Asserts that generation `$t` of the grid renders as the bit string `$bits`.
#[macro_export]
macro_rules! assert_generation_bits {
    ($grid:expr, $t:expr, $bits:expr) => {
        let row = $grid.row($t).expect("generation out of range");
        assert_eq!(
            row.to_string(),
            $bits,
            "Generation {} mismatch",
            $t
        );
    };
}

/// Asserts that a float lies in `[$lo, $hi]`.
#[macro_export]
macro_rules! assert_within {
    ($value:expr, $lo:expr, $hi:expr) => {
        let v = $value;
        assert!(
            v >= $lo && v <= $hi,
            "{} = {} is outside [{}, {}]",
            stringify!($value),
            v,
            $lo,
            $hi
        );
    };
}
