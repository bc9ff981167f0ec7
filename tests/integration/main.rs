//! HTTP-level integration tests for the DropVault API.

mod helpers;

mod folder_test;
mod listing_test;
mod upload_test;
