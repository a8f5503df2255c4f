//! Supported Groq model IDs and update procedure.
//!
//! # Supported Models (as of 2026-08)
//!
//! | Model ID | Tier | Notes |
//! |----------|------|-------|
//! | `llama-3.3-70b-versatile` | Flagship | General-purpose (default) |
//! | `llama-3.1-8b-instant` | Fast | Cheapest, good for grading steps |
//! | `mixtral-8x7b-32768` | Legacy | Long context, being phased out |
//! | `gemma2-9b-it` | Small | Lightweight instruction-tuned |
//!
//! Reference: <https://console.groq.com/docs/models>
//!
//! # How to Add or Update Model Versions
//!
//! When Groq releases or retires a model, update these locations:
//!
//! 1. **Default constant** (`groq_api_provider.rs`) → `DEFAULT_GROQ_MODEL`
//! 2. **This documentation** (the model table above)
//!
//! Users can override the model without a code change via the
//! `model_name` field of `~/.config/sage/secret.json`, the
//! `GROQ_MODEL_NAME` environment variable, or the per-assistant
//! `model_name` keys in `~/.config/sage/config.toml`.
