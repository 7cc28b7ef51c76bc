pub mod legal_api;
