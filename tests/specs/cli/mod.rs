// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod control;
mod errors;
mod help;
mod ingest;
mod search;
