//! Lazy placeholders for YouTube and Vimeo embeds.
//!
//! [`embed::EmbedRewriter`] turns an embed block into a lightweight
//! thumbnail figure and keeps the original iframe markup in an inert
//! `<template>` for client-side activation.

pub mod cache;
pub mod config;
pub mod embed;
pub mod storage;
pub mod transport;
pub mod web;

#[cfg(test)]
mod tests;
