// dir.rs - 保存目录的清空与创建

use std::fs;
use std::io;
use std::path::Path;

/// 删除目录下的所有文件和子目录，但保留目录本身
///
/// 目录不存在时直接返回成功。
pub fn clean(dir: &Path) -> io::Result<()> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in entries {
        let path = entry?.path();
        // symlink_metadata 不跟随链接，指向目录的链接只删链接本身
        if fs::symlink_metadata(&path)?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }

    Ok(())
}

/// 递归创建目录，已存在时什么也不做
pub fn create(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}
