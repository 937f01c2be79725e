// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary


mod authz;
mod identity;
mod lifecycle;
mod sessions;
