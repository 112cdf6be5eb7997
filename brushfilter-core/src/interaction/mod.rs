/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
pub mod filter;
pub mod slider;
pub mod throttle;
