// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod crawl_loop_test;
pub mod helpers;
pub mod repositories;
pub mod session_test;
pub mod youtube_client_test;
