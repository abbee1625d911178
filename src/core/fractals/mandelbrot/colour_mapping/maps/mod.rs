pub mod channel_multiplier;
