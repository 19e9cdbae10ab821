//! 定数時間の文字列比較。

/// 2 つの文字列を定数時間で比較する。
///
/// 長さが異なる場合は即座に false を返す（漏れるのは長さのみ）。
/// 長さが等しい場合は不一致位置に関わらず全バイトを走査し、XOR の OR 累積が 0 のときのみ true を返す。
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut mismatch = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        mismatch |= x ^ y;
    }
    // 累積値の判定を最適化で早期終了へ畳み込ませない
    std::hint::black_box(mismatch) == 0
}
