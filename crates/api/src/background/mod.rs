pub mod rate_limit_sweep;
