pub mod ensemble_stats;
pub mod ou_analytic;
