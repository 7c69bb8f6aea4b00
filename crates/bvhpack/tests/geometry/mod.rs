mod str_grid;
mod str_shared;
mod trimesh_pack;
