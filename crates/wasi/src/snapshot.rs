//! The WASI `wasi_snapshot_preview1` functions themselves, each taking the
//! decoded arguments and returning the `errno` to pack onto the Wasm
//! operand stack. Bounds failures on guest pointers are raised as the
//! engine's own `MemoryOutOfBounds` trap rather than an errno, matching the
//! host bridge's "every handler validates pointers against memory size"
//! rule.

use wasm5::{Memory, TrapCode};

use crate::ctx::WasiCtx;
use crate::errno::Errno;

const OFLAGS_CREAT: u32 = 1;
const OFLAGS_DIRECTORY: u32 = 2;
const OFLAGS_EXCL: u32 = 4;
const OFLAGS_TRUNC: u32 = 8;

const FDFLAGS_APPEND: u16 = 1;

const RIGHTS_FD_READ: u64 = 1 << 1;
const RIGHTS_FD_WRITE: u64 = 1 << 6;

fn read_u32(mem: &Memory, addr: u32) -> Result<u32, TrapCode> {
    Ok(u32::from_le_bytes(mem.read(addr as u64, 4)?.try_into().unwrap()))
}

fn write_u32(mem: &mut Memory, addr: u32, v: u32) -> Result<(), TrapCode> {
    mem.write(addr as u64, &v.to_le_bytes())
}

fn write_u64(mem: &mut Memory, addr: u32, v: u64) -> Result<(), TrapCode> {
    mem.write(addr as u64, &v.to_le_bytes())
}

fn read_string(mem: &Memory, ptr: u32, len: u32) -> Result<String, TrapCode> {
    let bytes = mem.read(ptr as u64, len as usize)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

pub(crate) fn args_sizes_get(mem: &mut Memory, argc_ptr: u32, argv_buf_size_ptr: u32) -> Result<u32, TrapCode> {
    write_u32(mem, argc_ptr, 0)?;
    write_u32(mem, argv_buf_size_ptr, 0)?;
    Ok(Errno::Success.as_u32())
}

pub(crate) fn args_get(_mem: &mut Memory, _argv_ptr: u32, _argv_buf_ptr: u32) -> Result<u32, TrapCode> {
    Ok(Errno::Success.as_u32())
}

pub(crate) fn environ_sizes_get(mem: &mut Memory, count_ptr: u32, buf_size_ptr: u32) -> Result<u32, TrapCode> {
    write_u32(mem, count_ptr, 0)?;
    write_u32(mem, buf_size_ptr, 0)?;
    Ok(Errno::Success.as_u32())
}

pub(crate) fn environ_get(_mem: &mut Memory, _environ_ptr: u32, _environ_buf_ptr: u32) -> Result<u32, TrapCode> {
    Ok(Errno::Success.as_u32())
}

pub(crate) fn proc_exit(ctx: &mut WasiCtx, code: u32) -> Result<u32, TrapCode> {
    ctx.exit_code = Some(code as i32);
    // There is no dedicated trap kind for a clean host-requested exit; the
    // caller inspects `WasiCtx::exit_code` first and treats any trap here
    // as a side effect of unwinding rather than a real fault.
    Err(TrapCode::Unreachable)
}

pub(crate) fn clock_time_get(ctx: &WasiCtx, mem: &mut Memory, clock_id: u32, time_ptr: u32) -> Result<u32, TrapCode> {
    let ns = match clock_id {
        0 => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0),
        1 => ctx.start_time.elapsed().as_nanos() as u64,
        _ => return Ok(Errno::Inval.as_u32()),
    };
    write_u64(mem, time_ptr, ns)?;
    Ok(Errno::Success.as_u32())
}

pub(crate) fn fd_close(ctx: &mut WasiCtx, fd: u32) -> Result<u32, TrapCode> {
    Ok(errno_of(ctx.close(fd)))
}

pub(crate) fn fd_write(
    ctx: &mut WasiCtx,
    mem: &mut Memory,
    fd: u32,
    iovs_ptr: u32,
    iovs_len: u32,
    nwritten_ptr: u32,
) -> Result<u32, TrapCode> {
    let mut data = Vec::new();
    for i in 0..iovs_len {
        let entry = iovs_ptr + i * 8;
        let buf_ptr = read_u32(mem, entry)?;
        let buf_len = read_u32(mem, entry + 4)?;
        data.extend_from_slice(mem.read(buf_ptr as u64, buf_len as usize)?);
    }
    match ctx.write(fd, &data) {
        Ok(n) => {
            write_u32(mem, nwritten_ptr, n as u32)?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_read(
    ctx: &mut WasiCtx,
    mem: &mut Memory,
    fd: u32,
    iovs_ptr: u32,
    iovs_len: u32,
    nread_ptr: u32,
) -> Result<u32, TrapCode> {
    let mut total = 0usize;
    for i in 0..iovs_len {
        let entry = iovs_ptr + i * 8;
        let buf_ptr = read_u32(mem, entry)?;
        let buf_len = read_u32(mem, entry + 4)?;
        let mut chunk = vec![0u8; buf_len as usize];
        let n = match ctx.read(fd, &mut chunk) {
            Ok(n) => n,
            Err(e) => return Ok(e.as_u32()),
        };
        mem.write(buf_ptr as u64, &chunk[..n])?;
        total += n;
        if n < buf_len as usize {
            break;
        }
    }
    write_u32(mem, nread_ptr, total as u32)?;
    Ok(Errno::Success.as_u32())
}

pub(crate) fn fd_seek(
    ctx: &mut WasiCtx,
    mem: &mut Memory,
    fd: u32,
    offset: i64,
    whence: u32,
    newoffset_ptr: u32,
) -> Result<u32, TrapCode> {
    match ctx.seek(fd, offset, whence as u8) {
        Ok(pos) => {
            write_u64(mem, newoffset_ptr, pos)?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_prestat_get(ctx: &WasiCtx, mem: &mut Memory, fd: u32, prestat_ptr: u32) -> Result<u32, TrapCode> {
    match ctx.prestat_dir(fd) {
        Ok(name) => {
            write_u32(mem, prestat_ptr, 0)?;
            write_u32(mem, prestat_ptr + 4, name.len() as u32)?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_prestat_dir_name(
    ctx: &WasiCtx,
    mem: &mut Memory,
    fd: u32,
    path_ptr: u32,
    path_len: u32,
) -> Result<u32, TrapCode> {
    match ctx.prestat_dir(fd) {
        Ok(name) => {
            if name.len() > path_len as usize {
                return Ok(Errno::Inval.as_u32());
            }
            mem.write(path_ptr as u64, name.as_bytes())?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_fdstat_get(ctx: &WasiCtx, mem: &mut Memory, fd: u32, fdstat_ptr: u32) -> Result<u32, TrapCode> {
    match ctx.filetype(fd) {
        Ok(filetype) => {
            mem.write(fdstat_ptr as u64, &[filetype as u8, 0])?; // filetype, pad
            mem.write((fdstat_ptr + 2) as u64, &0u16.to_le_bytes())?; // flags
            write_u32(mem, fdstat_ptr + 4, 0)?; // pad
            write_u64(mem, fdstat_ptr + 8, RIGHTS_FD_READ | RIGHTS_FD_WRITE)?;
            write_u64(mem, fdstat_ptr + 16, RIGHTS_FD_READ | RIGHTS_FD_WRITE)?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_filestat_get(ctx: &WasiCtx, mem: &mut Memory, fd: u32, filestat_ptr: u32) -> Result<u32, TrapCode> {
    let filetype = match ctx.filetype(fd) {
        Ok(t) => t,
        Err(e) => return Ok(e.as_u32()),
    };
    let (size, mtime_ns) = match ctx.metadata(fd) {
        Ok(Some(meta)) => {
            let ns = meta
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0);
            (meta.len(), ns)
        }
        Ok(None) => (0, 0),
        Err(e) => return Ok(e.as_u32()),
    };
    write_u64(mem, filestat_ptr, 0)?; // dev
    write_u64(mem, filestat_ptr + 8, 0)?; // ino
    mem.write((filestat_ptr + 16) as u64, &[filetype as u8, 0, 0, 0, 0, 0, 0, 0])?; // filetype + 7 pad
    write_u64(mem, filestat_ptr + 24, 1)?; // nlink
    write_u64(mem, filestat_ptr + 32, size)?;
    write_u64(mem, filestat_ptr + 40, mtime_ns)?; // atim
    write_u64(mem, filestat_ptr + 48, mtime_ns)?; // mtim
    write_u64(mem, filestat_ptr + 56, mtime_ns)?; // ctim
    Ok(Errno::Success.as_u32())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn path_open(
    ctx: &mut WasiCtx,
    mem: &mut Memory,
    dirfd: u32,
    path_ptr: u32,
    path_len: u32,
    oflags: u32,
    fs_rights_base: u64,
    fdflags: u32,
    fd_out_ptr: u32,
) -> Result<u32, TrapCode> {
    let path = read_string(mem, path_ptr, path_len)?;
    let writable = fs_rights_base & RIGHTS_FD_WRITE != 0;
    let append = fdflags & u32::from(FDFLAGS_APPEND) != 0;
    let result = ctx.open(
        dirfd,
        &path,
        oflags & OFLAGS_CREAT != 0,
        oflags & OFLAGS_DIRECTORY != 0,
        oflags & OFLAGS_EXCL != 0,
        oflags & OFLAGS_TRUNC != 0,
        append,
        writable,
    );
    match result {
        Ok(fd) => {
            write_u32(mem, fd_out_ptr, fd)?;
            Ok(Errno::Success.as_u32())
        }
        Err(e) => Ok(e.as_u32()),
    }
}

pub(crate) fn fd_readdir(
    ctx: &WasiCtx,
    mem: &mut Memory,
    fd: u32,
    buf_ptr: u32,
    buf_len: u32,
    cookie: u64,
    bufused_ptr: u32,
) -> Result<u32, TrapCode> {
    let entries = match ctx.readdir(fd) {
        Ok(e) => e,
        Err(e) => return Ok(e.as_u32()),
    };
    let mut pos = buf_ptr;
    let end = buf_ptr.saturating_add(buf_len);
    for (i, (name, filetype)) in entries.into_iter().enumerate().skip(cookie as usize) {
        let name_bytes = name.as_bytes();
        let record_len = 24 + name_bytes.len() as u32;
        if pos.saturating_add(record_len) > end {
            break;
        }
        let next_cookie = (i + 1) as u64;
        let header = [
            next_cookie.to_le_bytes().as_slice(),
            0u64.to_le_bytes().as_slice(), // ino
            (name_bytes.len() as u32).to_le_bytes().as_slice(),
            &[filetype as u8, 0, 0, 0],
        ]
        .concat();
        mem.write(pos as u64, &header)?;
        mem.write((pos + 24) as u64, name_bytes)?;
        pos += record_len;
    }
    write_u32(mem, bufused_ptr, pos - buf_ptr)?;
    Ok(Errno::Success.as_u32())
}

fn errno_of(result: Result<(), Errno>) -> u32 {
    match result {
        Ok(()) => Errno::Success.as_u32(),
        Err(e) => e.as_u32(),
    }
}
