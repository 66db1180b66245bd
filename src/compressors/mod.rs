pub mod arc_lz;
