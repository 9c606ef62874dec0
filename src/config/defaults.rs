pub(super) const MIN_POSITION_INTERVAL_MS: u64 = 20;
pub(super) const MAX_POSITION_INTERVAL_MS: u64 = 2_000;

pub(super) fn default_position_interval_ms() -> u64 {
    200
}

pub(super) fn default_false() -> bool {
    false
}

pub(super) fn clamp_position_interval_ms(value: u64) -> u64 {
    value.clamp(MIN_POSITION_INTERVAL_MS, MAX_POSITION_INTERVAL_MS)
}
