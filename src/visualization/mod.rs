pub mod elevator_vis2d;
