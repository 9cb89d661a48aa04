pub mod sourcegraph;
